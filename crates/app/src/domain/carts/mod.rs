//! Carts

pub mod errors;
pub mod models;
pub mod retry;
pub mod service;

pub use errors::{CartsServiceError, ValidationError};
pub use retry::RetryPolicy;
pub use service::*;
