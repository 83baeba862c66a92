//! HTTP cache purge client.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine::tags::CacheTag;
use zeroize::Zeroizing;

use crate::cache::{CacheError, CacheStore};

/// Configuration for an external tag purge endpoint.
#[derive(Clone)]
pub struct PurgeConfig {
    /// Purge endpoint, e.g. `"https://edge.example/api/purge"`.
    pub endpoint: String,

    /// Bearer token for the endpoint.
    pub token: Zeroizing<String>,
}

impl fmt::Debug for PurgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurgeConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"**redacted**")
            .finish()
    }
}

/// Posts tags to an external cache so that edge copies are dropped.
#[derive(Debug, Clone)]
pub struct PurgeClient {
    config: PurgeConfig,
    http: Client,
}

#[derive(Debug, Serialize)]
struct PurgeRequest<'a> {
    tags: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PurgeResponse {
    #[serde(default)]
    purged: Vec<String>,
}

impl PurgeClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: PurgeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Purge `tags` in one request.
    ///
    /// Returns the tags the endpoint reports as purged.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx response.
    pub async fn purge<'a>(
        &self,
        tags: impl IntoIterator<Item = &'a CacheTag>,
    ) -> Result<Vec<String>, PurgeError> {
        let body = PurgeRequest {
            tags: tags.into_iter().map(CacheTag::as_str).collect(),
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(self.config.token.as_str())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PurgeError::UnexpectedResponse(format!(
                "purge request failed with status {status}: {text}"
            )));
        }

        let parsed: PurgeResponse = response.json().await?;

        Ok(parsed.purged)
    }
}

#[async_trait]
impl CacheStore for PurgeClient {
    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError> {
        self.purge([tag]).await?;

        Ok(())
    }
}

/// Errors that can occur when talking to the purge endpoint.
#[derive(Debug, Error)]
pub enum PurgeError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx response.
    #[error("unexpected response from purge endpoint: {0}")]
    UnexpectedResponse(String),
}
