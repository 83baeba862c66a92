//! Webhook authorization.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::revalidation::errors::RevalidationError;

const BEARER_PREFIX: &str = "Bearer ";

/// Shared secret webhook senders present as a bearer token.
#[derive(Clone)]
pub struct WebhookSecret {
    secret: Zeroizing<String>,
}

impl WebhookSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }

    fn matches(&self, presented: &str) -> bool {
        let expected = self.secret.as_bytes();
        let presented = presented.as_bytes();

        expected.len() == presented.len()
            && expected
                .iter()
                .zip(presented)
                .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(**redacted**)")?;
        Ok(())
    }
}

/// Check an `Authorization` header against the configured secret.
///
/// Without a configured secret (or an empty one) every request is rejected.
///
/// # Errors
///
/// Returns [`RevalidationError::Unauthorized`] when the header is missing,
/// is not a bearer token or does not match.
pub fn authorize(
    secret: Option<&WebhookSecret>,
    authorization: Option<&str>,
) -> Result<(), RevalidationError> {
    let secret = secret
        .filter(|secret| !secret.secret.is_empty())
        .ok_or(RevalidationError::Unauthorized)?;

    let token = authorization
        .and_then(|header| header.strip_prefix(BEARER_PREFIX))
        .ok_or(RevalidationError::Unauthorized)?;

    if !secret.matches(token.trim()) {
        return Err(RevalidationError::Unauthorized);
    }

    Ok(())
}
