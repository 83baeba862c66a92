//! Page service errors.

use thiserror::Error;

use crate::domain::catalog::CatalogServiceError;

#[derive(Debug, Error)]
pub enum PagesServiceError {
    #[error("catalog read failed")]
    Catalog(#[from] CatalogServiceError),
}

impl PagesServiceError {
    /// HTTP status a routing layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Catalog(error) => error.status_code(),
        }
    }
}
