use crate::models::*;
use crate::services::NotificationService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/notifications",
    tag = "notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "Malformed end timestamp", body = ErrorResponse)
    )
)]
pub async fn create_notification(
    notification_service: web::Data<NotificationService>,
    dto: web::Json<CreateNotificationDto>,
) -> Result<HttpResponse> {
    match notification_service.create(dto.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on the text"),
        ("dateFrom" = Option<String>, Query, description = "Created-at lower bound, ISO-8601"),
        ("dateTo" = Option<String>, Query, description = "Created-at upper bound, ISO-8601"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated notification list")
    )
)]
pub async fn get_notifications(
    notification_service: web::Data<NotificationService>,
    query: web::Query<FindNotificationsQuery>,
) -> Result<HttpResponse> {
    match notification_service.find_all(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/notifications/active",
    tag = "notifications",
    responses(
        (status = 200, description = "Notifications that have not expired")
    )
)]
pub async fn get_active_notifications(
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    match notification_service.find_active().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/notifications/{id}",
    tag = "notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification found", body = NotificationResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    )
)]
pub async fn get_notification(
    notification_service: web::Data<NotificationService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match notification_service.find_one(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/notifications/{id}",
    tag = "notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    request_body = UpdateNotificationDto,
    responses(
        (status = 200, description = "Notification updated", body = NotificationResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    )
)]
pub async fn update_notification(
    notification_service: web::Data<NotificationService>,
    id: web::Path<i32>,
    dto: web::Json<UpdateNotificationDto>,
) -> Result<HttpResponse> {
    match notification_service
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
    path = "/notifications/{id}",
    tag = "notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = NotificationResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    )
)]
pub async fn delete_notification(
    notification_service: web::Data<NotificationService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match notification_service.remove(id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn notification_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .route("", web::post().to(create_notification))
            .route("", web::get().to(get_notifications))
            .route("/active", web::get().to(get_active_notifications))
            .route("/{id}", web::get().to(get_notification))
            .route("/{id}", web::patch().to(update_notification))
            .route("/{id}", web::delete().to(delete_notification)),
    );
}
