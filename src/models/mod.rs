pub mod button;
pub mod common;
pub mod notification;
pub mod pagination;
pub mod partner;
pub mod payment;
pub mod promo_code;
pub mod request;
pub mod visitor;

pub use button::*;
pub use common::*;
pub use notification::*;
pub use pagination::*;
pub use partner::*;
pub use payment::*;
pub use promo_code::*;
pub use request::*;
pub use visitor::*;
