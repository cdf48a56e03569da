use crate::models::*;
use crate::services::PartnerService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/partners",
    tag = "partners",
    request_body = CreatePartnerDto,
    responses(
        (status = 201, description = "Partner created", body = PartnerResponse),
        (status = 409, description = "Username or code already taken", body = ErrorResponse)
    )
)]
pub async fn create_partner(
    partner_service: web::Data<PartnerService>,
    dto: web::Json<CreatePartnerDto>,
) -> Result<HttpResponse> {
    match partner_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/partners",
    tag = "partners",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on username"),
        ("dateFrom" = Option<String>, Query, description = "Created-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Created-at upper bound, ISO-8601"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated partner list"),
        (status = 400, description = "Invalid pagination or date filter", body = ErrorResponse)
    )
)]
pub async fn get_partners(
    partner_service: web::Data<PartnerService>,
    query: web::Query<FindPartnersQuery>,
) -> Result<HttpResponse> {
    match partner_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/partners/by-code/{code}",
    tag = "partners",
    params(("code" = String, Path, description = "Referral code")),
    responses(
        (status = 200, description = "Partner found", body = PartnerResponse),
        (status = 404, description = "No partner with this code", body = ErrorResponse)
    )
)]
pub async fn get_partner_by_code(
    partner_service: web::Data<PartnerService>,
    code: web::Path<String>,
) -> Result<HttpResponse> {
    match partner_service.find_by_code(&code).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/partners/{id}",
    tag = "partners",
    params(("id" = i32, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Partner found", body = PartnerResponse),
        (status = 404, description = "Partner not found", body = ErrorResponse)
    )
)]
pub async fn get_partner(
    partner_service: web::Data<PartnerService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match partner_service.find_one(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/partners/{id}",
    tag = "partners",
    params(("id" = i32, Path, description = "Partner ID")),
    request_body = UpdatePartnerDto,
    responses(
        (status = 200, description = "Partner updated", body = PartnerResponse),
        (status = 404, description = "Partner not found", body = ErrorResponse),
        (status = 409, description = "Username or code already taken", body = ErrorResponse)
    )
)]
pub async fn update_partner(
    partner_service: web::Data<PartnerService>,
    id: web::Path<i32>,
    dto: web::Json<UpdatePartnerDto>,
) -> Result<HttpResponse> {
    match partner_service
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
    path = "/partners/{id}",
    tag = "partners",
    params(("id" = i32, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Partner deleted", body = PartnerResponse),
        (status = 404, description = "Partner not found", body = ErrorResponse)
    )
)]
pub async fn delete_partner(
    partner_service: web::Data<PartnerService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match partner_service.remove(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn partner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partners")
            .route("", web::post().to(create_partner))
            .route("", web::get().to(get_partners))
            .route("/by-code/{code}", web::get().to(get_partner_by_code))
            .route("/{id}", web::get().to(get_partner))
            .route("/{id}", web::patch().to(update_partner))
            .route("/{id}", web::delete().to(delete_partner)),
    );
}
