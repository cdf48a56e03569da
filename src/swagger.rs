use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{PartnerBonusStatus, PaymentStatus, RequestStatus, RequisiteType};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::partner::create_partner,
        handlers::partner::get_partners,
        handlers::partner::get_partner_by_code,
        handlers::partner::get_partner,
        handlers::partner::update_partner,
        handlers::partner::delete_partner,
        handlers::request::create_request,
        handlers::request::get_requests,
        handlers::request::get_request_stats,
        handlers::request::get_requests_by_partner,
        handlers::request::get_request,
        handlers::request::update_request,
        handlers::request::delete_request,
        handlers::payment::create_payment,
        handlers::payment::get_payments,
        handlers::payment::get_payment_stats,
        handlers::payment::get_payments_by_email,
        handlers::payment::get_payment,
        handlers::payment::update_payment,
        handlers::payment::delete_payment,
        handlers::promo_code::create_promo_code,
        handlers::promo_code::get_promo_codes,
        handlers::promo_code::get_promo_code_by_code,
        handlers::promo_code::validate_promo_code,
        handlers::promo_code::get_promo_code,
        handlers::promo_code::update_promo_code,
        handlers::promo_code::delete_promo_code,
        handlers::visitor::create_visitor,
        handlers::visitor::get_visitors,
        handlers::visitor::get_visitor_stats,
        handlers::visitor::get_visitor,
        handlers::visitor::update_visitor,
        handlers::visitor::delete_visitor,
        handlers::button::create_button,
        handlers::button::get_buttons,
        handlers::button::track_click,
        handlers::button::get_button_stats,
        handlers::button::increment_button_click,
        handlers::button::get_button,
        handlers::button::update_button,
        handlers::button::delete_button,
        handlers::notification::create_notification,
        handlers::notification::get_notifications,
        handlers::notification::get_active_notifications,
        handlers::notification::get_notification,
        handlers::notification::update_notification,
        handlers::notification::delete_notification,
    ),
    components(
        schemas(
            RequisiteType,
            PartnerBonusStatus,
            RequestStatus,
            PaymentStatus,
            CreatePartnerDto,
            UpdatePartnerDto,
            PartnerResponse,
            CreateRequestDto,
            UpdateRequestDto,
            RequestResponse,
            CreatePaymentDto,
            UpdatePaymentDto,
            PaymentResponse,
            PromoCodeInfo,
            PaymentStatsResponse,
            CreatePromoCodeDto,
            UpdatePromoCodeDto,
            PromoCodeResponse,
            ValidatePromoCodeResponse,
            CreateVisitorDto,
            UpdateVisitorDto,
            VisitorResponse,
            CreateButtonDto,
            UpdateButtonDto,
            TrackClickDto,
            ButtonResponse,
            ButtonClickStats,
            CreateNotificationDto,
            UpdateNotificationDto,
            NotificationResponse,
            ApiError,
            ErrorResponse,
        )
    ),
    tags(
        (name = "partners", description = "Referral partner management"),
        (name = "requests", description = "Inbound lead requests"),
        (name = "payments", description = "Payment records and revenue stats"),
        (name = "promo-codes", description = "Promo code management and validation"),
        (name = "visitors", description = "Site visitor analytics"),
        (name = "buttons", description = "Frontend button click tracking"),
        (name = "notifications", description = "Site-wide notifications"),
    ),
    info(
        title = "MTrade Admin Backend API",
        version = "1.0.0",
        description = "REST API for the MTrade admin panel"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
