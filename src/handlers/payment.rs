use crate::models::*;
use crate::services::PaymentService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Invalid amount or unusable promo code", body = ErrorResponse),
        (status = 404, description = "Referenced promo code not found", body = ErrorResponse)
    )
)]
pub async fn create_payment(
    payment_service: web::Data<PaymentService>,
    dto: web::Json<CreatePaymentDto>,
) -> Result<HttpResponse> {
    match payment_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    params(
        ("status" = Option<String>, Query, description = "Exact status: PENDING/COMPLETED"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name, email, product or source"),
        ("dateFrom" = Option<String>, Query, description = "Created-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Created-at upper bound, ISO-8601"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated payment list with embedded promo codes"),
        (status = 400, description = "Invalid pagination or date filter", body = ErrorResponse)
    )
)]
pub async fn get_payments(
    payment_service: web::Data<PaymentService>,
    query: web::Query<FindPaymentsQuery>,
) -> Result<HttpResponse> {
    match payment_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/payments/stats",
    tag = "payments",
    params(
        ("dateFrom" = Option<String>, Query, description = "Created-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Created-at upper bound, ISO-8601")
    ),
    responses(
        (status = 200, description = "Pending/completed counts and completed revenue", body = PaymentStatsResponse)
    )
)]
pub async fn get_payment_stats(
    payment_service: web::Data<PaymentService>,
    query: web::Query<StatsDateQuery>,
) -> Result<HttpResponse> {
    match payment_service.stats(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/payments/by-email/{email}",
    tag = "payments",
    params(("email" = String, Path, description = "Payer email")),
    responses(
        (status = 200, description = "Payments recorded for the email")
    )
)]
pub async fn get_payments_by_email(
    payment_service: web::Data<PaymentService>,
    email: web::Path<String>,
) -> Result<HttpResponse> {
    match payment_service.find_by_email(&email).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment found", body = PaymentResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
pub async fn get_payment(
    payment_service: web::Data<PaymentService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match payment_service.find_one(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePaymentDto,
    responses(
        (status = 200, description = "Payment updated", body = PaymentResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
pub async fn update_payment(
    payment_service: web::Data<PaymentService>,
    id: web::Path<i32>,
    dto: web::Json<UpdatePaymentDto>,
) -> Result<HttpResponse> {
    match payment_service
        .update(id.into_inner(), dto.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment deleted", body = PaymentResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
pub async fn delete_payment(
    payment_service: web::Data<PaymentService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match payment_service.remove(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn payment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("", web::post().to(create_payment))
            .route("", web::get().to(get_payments))
            .route("/stats", web::get().to(get_payment_stats))
            .route("/by-email/{email}", web::get().to(get_payments_by_email))
            .route("/{id}", web::get().to(get_payment))
            .route("/{id}", web::patch().to(update_payment))
            .route("/{id}", web::delete().to(delete_payment)),
    );
}
