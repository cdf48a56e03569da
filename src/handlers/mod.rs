pub mod button;
pub mod notification;
pub mod partner;
pub mod payment;
pub mod promo_code;
pub mod request;
pub mod visitor;

pub use button::button_config;
pub use notification::notification_config;
pub use partner::partner_config;
pub use payment::payment_config;
pub use promo_code::promo_code_config;
pub use request::request_config;
pub use visitor::visitor_config;
