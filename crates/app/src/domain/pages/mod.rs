//! Page aggregates composed from catalog and content reads.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::PagesServiceError;
pub use models::{CategoryPageDto, HomePageDto};
pub use service::*;
