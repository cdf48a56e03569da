use crate::models::*;
use crate::services::VisitorService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    request_body = CreateVisitorDto,
    responses(
        (status = 201, description = "Visitor recorded", body = VisitorResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn create_visitor(
    visitor_service: web::Data<VisitorService>,
    dto: web::Json<CreateVisitorDto>,
) -> Result<HttpResponse> {
    match visitor_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on source, country, device or browser"),
        ("country" = Option<String>, Query, description = "Case-insensitive match on country"),
        ("device" = Option<String>, Query, description = "Case-insensitive match on device"),
        ("browser" = Option<String>, Query, description = "Case-insensitive match on browser"),
        ("trafficSource" = Option<String>, Query, description = "Case-insensitive match on traffic source"),
        ("dateFrom" = Option<String>, Query, description = "Created-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Created-at upper bound, ISO-8601"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated visitor list"),
        (status = 400, description = "Invalid pagination or date filter", body = ErrorResponse)
    )
)]
pub async fn get_visitors(
    visitor_service: web::Data<VisitorService>,
    query: web::Query<FindVisitorsQuery>,
) -> Result<HttpResponse> {
    match visitor_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/visitors/stats/{field}",
    tag = "visitors",
    params(("field" = String, Path, description = "country, device, browser or trafficSource")),
    responses(
        (status = 200, description = "Visitor counts per dimension value"),
        (status = 400, description = "Unknown stats field", body = ErrorResponse)
    )
)]
pub async fn get_visitor_stats(
    visitor_service: web::Data<VisitorService>,
    field: web::Path<String>,
) -> Result<HttpResponse> {
    match visitor_service.stats_by(&field).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Visitor UUID")),
    responses(
        (status = 200, description = "Visitor found", body = VisitorResponse),
        (status = 404, description = "Visitor not found", body = ErrorResponse)
    )
)]
pub async fn get_visitor(
    visitor_service: web::Data<VisitorService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    match visitor_service.find_one(&id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Visitor UUID")),
    request_body = UpdateVisitorDto,
    responses(
        (status = 200, description = "Visitor updated", body = VisitorResponse),
        (status = 404, description = "Visitor not found", body = ErrorResponse)
    )
)]
pub async fn update_visitor(
    visitor_service: web::Data<VisitorService>,
    id: web::Path<String>,
    dto: web::Json<UpdateVisitorDto>,
) -> Result<HttpResponse> {
    match visitor_service.update(&id, dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Visitor UUID")),
    responses(
        (status = 200, description = "Visitor deleted", body = VisitorResponse),
        (status = 404, description = "Visitor not found", body = ErrorResponse)
    )
)]
pub async fn delete_visitor(
    visitor_service: web::Data<VisitorService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    match visitor_service.remove(&id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn visitor_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/visitors")
            .route("", web::post().to(create_visitor))
            .route("", web::get().to(get_visitors))
            .route("/stats/{field}", web::get().to(get_visitor_stats))
            .route("/{id}", web::get().to(get_visitor))
            .route("/{id}", web::patch().to(update_visitor))
            .route("/{id}", web::delete().to(delete_visitor)),
    );
}
