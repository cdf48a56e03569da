pub mod filters;

pub use filters::{contains_ci, DateRange};
