//! Content service errors.

use thiserror::Error;

use crate::clients::ContentError;

#[derive(Debug, Error)]
pub enum ContentServiceError {
    #[error("content platform failure")]
    Upstream(#[from] ContentError),
}

impl ContentServiceError {
    /// HTTP status a routing layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Upstream(_) => 502,
        }
    }
}
