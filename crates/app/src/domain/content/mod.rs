//! Editorial content reads.

pub mod errors;
pub mod service;

pub use errors::ContentServiceError;
pub use service::*;
