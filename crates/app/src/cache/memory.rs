//! In-process tagged cache.

use std::{future::Future, sync::RwLock};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use vitrine::tags::{CachePolicy, CacheTag, TagSet};

use crate::cache::{CacheError, CacheStore};

/// Entry count at which a write first sweeps out expired entries.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    tags: TagSet,
    expires_at: Timestamp,
}

/// Serialized read results keyed by request shape, tagged for invalidation and
/// expired after their [`CachePolicy`] window.
#[derive(Debug, Default)]
pub struct TaggedCache {
    entries: RwLock<FxHashMap<String, Entry>>,
}

impl TaggedCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a live entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is poisoned or the entry does not
    /// decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        self.get_at(key, Timestamp::now())
    }

    fn get_at<T: DeserializeOwned>(
        &self,
        key: &str,
        now: Timestamp,
    ) -> Result<Option<T>, CacheError> {
        let expired = {
            let entries = self
                .entries
                .read()
                .map_err(|_poisoned| CacheError::Poisoned)?;

            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    return Ok(Some(serde_json::from_value(entry.value.clone())?));
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut entries = self
                .entries
                .write()
                .map_err(|_poisoned| CacheError::Poisoned)?;

            // Another reader may have reloaded it in between.
            if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
                entries.remove(key);
            }
        }

        Ok(None)
    }

    /// Store `value` under `key` with `tags` for the policy window.
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is poisoned or `value` does not encode.
    pub fn put<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        tags: TagSet,
        policy: CachePolicy,
    ) -> Result<(), CacheError> {
        self.put_at(key, value, tags, policy, Timestamp::now())
    }

    fn put_at<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        tags: TagSet,
        policy: CachePolicy,
        now: Timestamp,
    ) -> Result<(), CacheError> {
        let seconds = i64::try_from(policy.revalidate_seconds()).unwrap_or(i64::MAX);
        let ttl = SignedDuration::from_secs(seconds);

        let entry = Entry {
            value: serde_json::to_value(value)?,
            tags,
            expires_at: now.saturating_add(ttl).unwrap_or(Timestamp::MAX),
        };

        let mut entries = self
            .entries
            .write()
            .map_err(|_poisoned| CacheError::Poisoned)?;

        if entries.len() >= SWEEP_THRESHOLD {
            entries.retain(|_, entry| entry.expires_at > now);
        }

        entries.insert(key.to_string(), entry);

        Ok(())
    }

    /// Return the cached value for `key`, or load, store and return it.
    ///
    /// Loader errors are returned as is and nothing is stored. Cache failures
    /// are logged and fall through to the loader.
    ///
    /// # Errors
    ///
    /// Returns the loader's error.
    pub async fn get_or_load<T, E, F, Fut>(
        &self,
        key: &str,
        tags: TagSet,
        policy: CachePolicy,
        load: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get::<T>(key) {
            Ok(Some(hit)) => {
                tracing::trace!(key, "cache hit");
                return Ok(hit);
            }
            Ok(None) => tracing::trace!(key, "cache miss"),
            Err(error) => tracing::warn!(key, %error, "cache read failed"),
        }

        let value = load().await?;

        if let Err(error) = self.put(key, &value, tags, policy) {
            tracing::warn!(key, %error, "cache write failed");
        }

        Ok(value)
    }

    /// Drop every entry tagged `tag`; returns how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is poisoned.
    pub fn invalidate_tag(&self, tag: &CacheTag) -> Result<usize, CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_poisoned| CacheError::Poisoned)?;
        let before = entries.len();

        entries.retain(|_, entry| !entry.tags.contains(tag));

        Ok(before - entries.len())
    }

    /// Number of stored entries. Expired entries count until a read or a
    /// sweep drops them.
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is poisoned.
    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self
            .entries
            .read()
            .map_err(|_poisoned| CacheError::Poisoned)?
            .len())
    }
}

#[async_trait]
impl CacheStore for TaggedCache {
    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError> {
        let dropped = self.invalidate_tag(tag)?;

        tracing::debug!(%tag, dropped, "invalidated cache tag");

        Ok(())
    }
}
