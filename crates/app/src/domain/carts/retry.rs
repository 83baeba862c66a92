//! Optimistic concurrency retry.
//!
//! Every cart update quotes the version the caller last saw. When the
//! platform rejects it as stale the cart is refetched and the same actions
//! are resubmitted at the current version. Only conflicts are retried; every
//! other failure returns immediately. Once the retry budget is spent one final
//! attempt is made and its outcome returned as is.

use tracing::Span;
use vitrine::models::{Cart, CartAction};

use crate::clients::{CommercePlatform, PlatformError};

/// Conflict retries allowed before the final attempt.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Conflict retries before the final attempt; each costs one refetch.
    pub max_conflict_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_conflict_retries: u32) -> Self {
        Self {
            max_conflict_retries,
        }
    }
}

/// Submit `actions` to `cart_id` starting at `version`, refetching and
/// resubmitting on version conflicts.
#[tracing::instrument(
    name = "carts.update_with_retry",
    skip(platform, actions, policy),
    fields(
        cart_id = %cart_id,
        version = version,
        attempt = tracing::field::Empty,
        action_count = actions.len()
    ),
    err
)]
pub async fn update_with_retry(
    platform: &dyn CommercePlatform,
    policy: RetryPolicy,
    cart_id: &str,
    version: u64,
    actions: &[CartAction],
) -> Result<Cart, PlatformError> {
    let span = Span::current();
    let mut version = version;

    for attempt in 1..=policy.max_conflict_retries {
        span.record("attempt", attempt);

        match platform.update_cart(cart_id, version, actions.to_vec()).await {
            Err(PlatformError::Conflict) => {
                tracing::debug!(cart_id, attempt, version, "cart version conflict, refetching");

                version = platform.get_cart(cart_id).await?.version;
            }
            result => return result.inspect(|cart| warn_if_not_advanced(cart, version)),
        }
    }

    span.record("attempt", policy.max_conflict_retries.saturating_add(1));

    tracing::warn!(
        cart_id,
        version,
        retries = policy.max_conflict_retries,
        "conflict retries exhausted, making final attempt"
    );

    platform
        .update_cart(cart_id, version, actions.to_vec())
        .await
        .inspect(|cart| warn_if_not_advanced(cart, version))
}

fn warn_if_not_advanced(cart: &Cart, submitted: u64) {
    if cart.version <= submitted {
        tracing::warn!(
            cart_id = %cart.id,
            submitted,
            returned = cart.version,
            "cart version did not advance after update"
        );
    }
}
