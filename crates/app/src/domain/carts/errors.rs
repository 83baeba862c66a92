//! Carts service errors.

use thiserror::Error;

use crate::clients::PlatformError;

/// Malformed caller input, rejected before any platform call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("productId or sku required")]
    MissingProductReference,

    #[error("quantity must be >= {minimum}, got {quantity}")]
    InvalidQuantity { quantity: i64, minimum: i64 },

    #[error("line item id required")]
    MissingLineItem,
}

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("invalid cart request")]
    Validation(#[from] ValidationError),

    #[error("cart not found")]
    NotFound,

    #[error("cart version conflict")]
    Conflict,

    #[error("commerce platform failure")]
    Upstream(#[source] PlatformError),
}

impl From<PlatformError> for CartsServiceError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::NotFound => Self::NotFound,
            PlatformError::Conflict => Self::Conflict,
            PlatformError::Upstream(_) => Self::Upstream(error),
        }
    }
}

impl CartsServiceError {
    /// HTTP status a routing layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Upstream(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_errors_keep_their_kind() {
        assert!(matches!(
            CartsServiceError::from(PlatformError::NotFound),
            CartsServiceError::NotFound
        ));
        assert!(matches!(
            CartsServiceError::from(PlatformError::Conflict),
            CartsServiceError::Conflict
        ));

        let upstream = CartsServiceError::from(PlatformError::Upstream("timeout".to_string()));

        assert_eq!(upstream.status_code(), 502);
    }

    #[test]
    fn validation_is_a_bad_request() {
        let error = CartsServiceError::from(ValidationError::MissingProductReference);

        assert_eq!(error.status_code(), 400);
    }
}
