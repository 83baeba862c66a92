//! Cache errors.

use thiserror::Error;

use crate::cache::PurgeError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache lock poisoned")]
    Poisoned,

    #[error("cache entry could not be encoded")]
    Encoding(#[source] serde_json::Error),

    #[error("cache purge failed")]
    Purge(#[from] PurgeError),
}

impl From<serde_json::Error> for CacheError {
    fn from(error: serde_json::Error) -> Self {
        Self::Encoding(error)
    }
}
