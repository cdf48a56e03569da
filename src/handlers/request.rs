use crate::models::*;
use crate::services::RequestService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequestDto,
    responses(
        (status = 201, description = "Request created", body = RequestResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn create_request(
    request_service: web::Data<RequestService>,
    dto: web::Json<CreateRequestDto>,
) -> Result<HttpResponse> {
    match request_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("status" = Option<String>, Query, description = "Exact status: PENDING/APPROVED/REJECTED/IN_PROGRESS"),
        ("source" = Option<String>, Query, description = "Case-insensitive match on source"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on full name or telegram"),
        ("dateFrom" = Option<String>, Query, description = "Created-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Created-at upper bound, ISO-8601"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated request list"),
        (status = 400, description = "Invalid pagination or date filter", body = ErrorResponse)
    )
)]
pub async fn get_requests(
    request_service: web::Data<RequestService>,
    query: web::Query<FindRequestsQuery>,
) -> Result<HttpResponse> {
    match request_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/requests/stats",
    tag = "requests",
    responses(
        (status = 200, description = "Request counts per status")
    )
)]
pub async fn get_request_stats(
    request_service: web::Data<RequestService>,
) -> Result<HttpResponse> {
    match request_service.stats_by_status().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/requests/by-partner/{partnerCode}",
    tag = "requests",
    params(("partnerCode" = String, Path, description = "Partner referral code")),
    responses(
        (status = 200, description = "Requests attributed to the partner")
    )
)]
pub async fn get_requests_by_partner(
    request_service: web::Data<RequestService>,
    partner_code: web::Path<String>,
) -> Result<HttpResponse> {
    match request_service.find_by_partner_code(&partner_code).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = RequestResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    )
)]
pub async fn get_request(
    request_service: web::Data<RequestService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match request_service.find_one(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestDto,
    responses(
        (status = 200, description = "Request updated", body = RequestResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    )
)]
pub async fn update_request(
    request_service: web::Data<RequestService>,
    id: web::Path<i32>,
    dto: web::Json<UpdateRequestDto>,
) -> Result<HttpResponse> {
    match request_service
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
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted", body = RequestResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    )
)]
pub async fn delete_request(
    request_service: web::Data<RequestService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match request_service.remove(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn request_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/requests")
            .route("", web::post().to(create_request))
            .route("", web::get().to(get_requests))
            .route("/stats", web::get().to(get_request_stats))
            .route(
                "/by-partner/{partnerCode}",
                web::get().to(get_requests_by_partner),
            )
            .route("/{id}", web::get().to(get_request))
            .route("/{id}", web::patch().to(update_request))
            .route("/{id}", web::delete().to(delete_request)),
    );
}
