pub mod button_service;
pub mod notification_service;
pub mod partner_service;
pub mod payment_service;
pub mod promo_code_service;
pub mod request_service;
pub mod visitor_service;

pub use button_service::ButtonService;
pub use notification_service::NotificationService;
pub use partner_service::PartnerService;
pub use payment_service::PaymentService;
pub use promo_code_service::PromoCodeService;
pub use request_service::RequestService;
pub use visitor_service::VisitorService;
