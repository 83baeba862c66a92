//! Application configuration

use clap::{Args, Parser};
use vitrine::locale::Locale;
use zeroize::Zeroizing;

use crate::{cache::PurgeConfig, domain::carts::RetryPolicy, domain::revalidation::WebhookSecret};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Locale used when a request names no supported locale
    #[arg(long, env = "DEFAULT_LOCALE", default_value = "en-GB")]
    pub default_locale: Locale,
}

/// Cart mutation settings.
#[derive(Debug, Args)]
pub struct CartsConfig {
    /// Version conflict retries before a cart update gives up
    #[arg(long, env = "CART_MAX_CONFLICT_RETRIES", default_value_t = 3_u32)]
    pub max_conflict_retries: u32,
}

impl CartsConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_conflict_retries)
    }
}

/// Edge cache purge settings.
#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Tag purge endpoint; edge purging is disabled when unset
    #[arg(long, env = "CACHE_PURGE_ENDPOINT")]
    pub purge_endpoint: Option<String>,

    /// Bearer token for the purge endpoint
    #[arg(long, env = "CACHE_PURGE_TOKEN", hide_env_values = true)]
    pub purge_token: Option<String>,
}

impl PurgeArgs {
    /// Purge client configuration, when an endpoint is set.
    #[must_use]
    pub fn purge_config(&self) -> Option<PurgeConfig> {
        let endpoint = self
            .purge_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())?;

        Some(PurgeConfig {
            endpoint: endpoint.to_string(),
            token: Zeroizing::new(self.purge_token.clone().unwrap_or_default()),
        })
    }
}

/// Webhook settings.
#[derive(Debug, Args)]
pub struct WebhookConfig {
    /// Shared secret webhook senders present as a bearer token
    #[arg(long, env = "REVALIDATE_SECRET", hide_env_values = true)]
    pub revalidate_secret: Option<String>,
}

impl WebhookConfig {
    #[must_use]
    pub fn secret(&self) -> Option<WebhookSecret> {
        self.revalidate_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(WebhookSecret::new)
    }
}

/// Vitrine application configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine-app", about = "Vitrine storefront services", long_about = None)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Storefront settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Cart mutation settings.
    #[command(flatten)]
    pub carts: CartsConfig,

    /// Edge cache purge settings.
    #[command(flatten)]
    pub purge: PurgeArgs,

    /// Webhook settings.
    #[command(flatten)]
    pub webhooks: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
