//! Revalidation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevalidationError {
    #[error("webhook request is not authorized")]
    Unauthorized,

    #[error("webhook payload is invalid")]
    InvalidPayload(#[from] serde_json::Error),
}

impl RevalidationError {
    /// HTTP status a routing layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::InvalidPayload(_) => 400,
        }
    }
}
