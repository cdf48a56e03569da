use crate::models::*;
use crate::services::PromoCodeService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/promo-codes",
    tag = "promo-codes",
    request_body = CreatePromoCodeDto,
    responses(
        (status = 201, description = "Promo code created", body = PromoCodeResponse),
        (status = 400, description = "Invalid discount or limit", body = ErrorResponse),
        (status = 409, description = "Code already taken", body = ErrorResponse)
    )
)]
pub async fn create_promo_code(
    promo_service: web::Data<PromoCodeService>,
    dto: web::Json<CreatePromoCodeDto>,
) -> Result<HttpResponse> {
    match promo_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/promo-codes",
    tag = "promo-codes",
    params(
        ("isActive" = Option<bool>, Query, description = "Filter on the active flag"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated promo code list")
    )
)]
pub async fn get_promo_codes(
    promo_service: web::Data<PromoCodeService>,
    query: web::Query<FindPromoCodesQuery>,
) -> Result<HttpResponse> {
    match promo_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/promo-codes/code/{code}",
    tag = "promo-codes",
    params(("code" = String, Path, description = "Promo code text")),
    responses(
        (status = 200, description = "Promo code found", body = PromoCodeResponse),
        (status = 404, description = "No promo code with this text", body = ErrorResponse)
    )
)]
pub async fn get_promo_code_by_code(
    promo_service: web::Data<PromoCodeService>,
    code: web::Path<String>,
) -> Result<HttpResponse> {
    match promo_service.find_by_code(&code).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/promo-codes/validate/{code}",
    tag = "promo-codes",
    params(("code" = String, Path, description = "Promo code text")),
    responses(
        (status = 200, description = "Whether the code would redeem right now", body = ValidatePromoCodeResponse)
    )
)]
pub async fn validate_promo_code(
    promo_service: web::Data<PromoCodeService>,
    code: web::Path<String>,
) -> Result<HttpResponse> {
    match promo_service.validate_code(&code).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/promo-codes/{id}",
    tag = "promo-codes",
    params(("id" = i32, Path, description = "Promo code ID")),
    responses(
        (status = 200, description = "Promo code found", body = PromoCodeResponse),
        (status = 404, description = "Promo code not found", body = ErrorResponse)
    )
)]
pub async fn get_promo_code(
    promo_service: web::Data<PromoCodeService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match promo_service.find_one(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/promo-codes/{id}",
    tag = "promo-codes",
    params(("id" = i32, Path, description = "Promo code ID")),
    request_body = UpdatePromoCodeDto,
    responses(
        (status = 200, description = "Promo code updated", body = PromoCodeResponse),
        (status = 404, description = "Promo code not found", body = ErrorResponse),
        (status = 409, description = "Code already taken", body = ErrorResponse)
    )
)]
pub async fn update_promo_code(
    promo_service: web::Data<PromoCodeService>,
    id: web::Path<i32>,
    dto: web::Json<UpdatePromoCodeDto>,
) -> Result<HttpResponse> {
    match promo_service
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
    path = "/promo-codes/{id}",
    tag = "promo-codes",
    params(("id" = i32, Path, description = "Promo code ID")),
    responses(
        (status = 200, description = "Promo code deleted", body = PromoCodeResponse),
        (status = 404, description = "Promo code not found", body = ErrorResponse)
    )
)]
pub async fn delete_promo_code(
    promo_service: web::Data<PromoCodeService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match promo_service.remove(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn promo_code_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/promo-codes")
            .route("", web::post().to(create_promo_code))
            .route("", web::get().to(get_promo_codes))
            .route("/code/{code}", web::get().to(get_promo_code_by_code))
            .route("/validate/{code}", web::post().to(validate_promo_code))
            .route("/{id}", web::get().to(get_promo_code))
            .route("/{id}", web::patch().to(update_promo_code))
            .route("/{id}", web::delete().to(delete_promo_code)),
    );
}
