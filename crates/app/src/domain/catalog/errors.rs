//! Catalog service errors.

use thiserror::Error;

use crate::clients::PlatformError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("not found")]
    NotFound,

    #[error("commerce platform failure")]
    Upstream(#[source] PlatformError),
}

impl CatalogServiceError {
    /// HTTP status a routing layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Upstream(_) => 502,
        }
    }
}

impl From<PlatformError> for CatalogServiceError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::NotFound => Self::NotFound,
            other => Self::Upstream(other),
        }
    }
}
