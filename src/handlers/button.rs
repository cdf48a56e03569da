use crate::models::*;
use crate::services::ButtonService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/buttons",
    tag = "buttons",
    request_body = CreateButtonDto,
    responses(
        (status = 201, description = "Button created", body = ButtonResponse)
    )
)]
pub async fn create_button(
    button_service: web::Data<ButtonService>,
    dto: web::Json<CreateButtonDto>,
) -> Result<HttpResponse> {
    match button_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/buttons",
    tag = "buttons",
    params(
        ("dateFrom" = Option<String>, Query, description = "Date window lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Date window upper bound, ISO-8601"),
        ("filterByUpdated" = Option<bool>, Query, description = "Apply the window to updated_at instead of created_at"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated button list"),
        (status = 400, description = "Invalid pagination or date filter", body = ErrorResponse)
    )
)]
pub async fn get_buttons(
    button_service: web::Data<ButtonService>,
    query: web::Query<FindButtonsQuery>,
) -> Result<HttpResponse> {
    match button_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/buttons/track-click",
    tag = "buttons",
    request_body = TrackClickDto,
    responses(
        (status = 200, description = "Click recorded, button auto-created if unknown", body = ButtonResponse)
    )
)]
pub async fn track_click(
    button_service: web::Data<ButtonService>,
    dto: web::Json<TrackClickDto>,
) -> Result<HttpResponse> {
    match button_service.track_click(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/buttons/stats",
    tag = "buttons",
    params(
        ("dateFrom" = Option<String>, Query, description = "Updated-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Updated-at upper bound, ISO-8601")
    ),
    responses(
        (status = 200, description = "Click totals grouped by button type")
    )
)]
pub async fn get_button_stats(
    button_service: web::Data<ButtonService>,
    query: web::Query<StatsDateQuery>,
) -> Result<HttpResponse> {
    match button_service.click_stats(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/buttons/{id}/click",
    tag = "buttons",
    params(("id" = i32, Path, description = "Button ID")),
    responses(
        (status = 200, description = "Click counter incremented", body = ButtonResponse),
        (status = 404, description = "Button not found", body = ErrorResponse)
    )
)]
pub async fn increment_button_click(
    button_service: web::Data<ButtonService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match button_service.increment_click(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/buttons/{id}",
    tag = "buttons",
    params(("id" = i32, Path, description = "Button ID")),
    responses(
        (status = 200, description = "Button found", body = ButtonResponse),
        (status = 404, description = "Button not found", body = ErrorResponse)
    )
)]
pub async fn get_button(
    button_service: web::Data<ButtonService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match button_service.find_one(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/buttons/{id}",
    tag = "buttons",
    params(("id" = i32, Path, description = "Button ID")),
    request_body = UpdateButtonDto,
    responses(
        (status = 200, description = "Button updated", body = ButtonResponse),
        (status = 404, description = "Button not found", body = ErrorResponse)
    )
)]
pub async fn update_button(
    button_service: web::Data<ButtonService>,
    id: web::Path<i32>,
    dto: web::Json<UpdateButtonDto>,
) -> Result<HttpResponse> {
    match button_service
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
    path = "/buttons/{id}",
    tag = "buttons",
    params(("id" = i32, Path, description = "Button ID")),
    responses(
        (status = 200, description = "Button deleted", body = ButtonResponse),
        (status = 404, description = "Button not found", body = ErrorResponse)
    )
)]
pub async fn delete_button(
    button_service: web::Data<ButtonService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match button_service.remove(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn button_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/buttons")
            .route("", web::post().to(create_button))
            .route("", web::get().to(get_buttons))
            .route("/track-click", web::post().to(track_click))
            .route("/stats", web::get().to(get_button_stats))
            .route("/{id}/click", web::post().to(increment_button_click))
            .route("/{id}", web::get().to(get_button))
            .route("/{id}", web::patch().to(update_button))
            .route("/{id}", web::delete().to(delete_button)),
    );
}
