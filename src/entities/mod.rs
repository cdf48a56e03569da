pub mod buttons;
pub mod notifications;
pub mod partners;
pub mod payments;
pub mod promo_codes;
pub mod requests;
pub mod visitors;

pub use buttons as button_entity;
pub use notifications as notification_entity;
pub use partners as partner_entity;
pub use payments as payment_entity;
pub use promo_codes as promo_code_entity;
pub use requests as request_entity;
pub use visitors as visitor_entity;

pub use partners::{PartnerBonusStatus, RequisiteType};
pub use payments::PaymentStatus;
pub use requests::RequestStatus;
