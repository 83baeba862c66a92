//! Cache revalidation on platform change notifications.

pub mod auth;
pub mod errors;
pub mod service;

pub use auth::WebhookSecret;
pub use errors::RevalidationError;
pub use service::*;
