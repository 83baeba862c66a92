//! Catalog reads: products, categories and category listings.

pub mod errors;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
