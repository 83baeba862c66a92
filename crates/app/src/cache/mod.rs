//! Tag-addressable caching.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use vitrine::tags::CacheTag;

pub mod errors;
pub mod memory;
pub mod purge;

pub use errors::CacheError;
pub use memory::TaggedCache;
pub use purge::{PurgeClient, PurgeConfig, PurgeError};

/// A cache that can drop every entry stored under a tag.
///
/// Invalidating a tag with no live entries is a no-op, never an error.
#[automock]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Invalidate every entry tagged `tag`.
    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError>;
}

/// Invalidates through several stores, e.g. the in-process cache and an edge
/// purge endpoint. Every layer is attempted; the first failure is returned.
pub struct LayeredStore {
    layers: Vec<Arc<dyn CacheStore>>,
}

impl LayeredStore {
    #[must_use]
    pub fn new(layers: Vec<Arc<dyn CacheStore>>) -> Self {
        Self { layers }
    }
}

#[async_trait]
impl CacheStore for LayeredStore {
    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError> {
        let mut first_error = None;

        for layer in &self.layers {
            if let Err(error) = layer.invalidate(tag).await {
                first_error.get_or_insert(error);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
