//! Revalidation service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;
use vitrine::{
    locale::Locale,
    revalidation::{CatalogChange, ContentChange, plan_catalog_change, plan_content_change},
    tags::TagSet,
};

use crate::{
    cache::CacheStore,
    domain::revalidation::{
        auth::{WebhookSecret, authorize},
        errors::RevalidationError,
    },
};

/// Outcome of one revalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidationReport {
    /// Correlates the report with its log lines.
    pub id: Uuid,

    /// Tags invalidated successfully.
    pub invalidated: Vec<String>,

    /// Tags whose invalidation failed.
    pub failed: Vec<String>,
}

impl RevalidationReport {
    /// Whether every planned tag was invalidated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Plans revalidations for every configured locale and dispatches them to a
/// cache store.
#[derive(Clone)]
pub struct CacheRevalidationService {
    store: Arc<dyn CacheStore>,
    locales: Vec<Locale>,
    secret: Option<WebhookSecret>,
}

impl CacheRevalidationService {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, locales: Vec<Locale>) -> Self {
        Self {
            store,
            locales,
            secret: None,
        }
    }

    /// Require webhook callers to present `secret`.
    #[must_use]
    pub fn with_secret(mut self, secret: WebhookSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Invalidate every tag, continuing past failures.
    #[tracing::instrument(
        name = "revalidation.dispatch",
        skip(self, tags),
        fields(
            report_id = tracing::field::Empty,
            planned = tags.len(),
            failed = tracing::field::Empty
        )
    )]
    pub async fn dispatch(&self, tags: TagSet) -> RevalidationReport {
        let mut report = RevalidationReport {
            id: Uuid::now_v7(),
            invalidated: Vec::new(),
            failed: Vec::new(),
        };

        let span = tracing::Span::current();
        span.record("report_id", tracing::field::display(report.id));

        for tag in &tags {
            match self.store.invalidate(tag).await {
                Ok(()) => report.invalidated.push(tag.to_string()),
                Err(error) => {
                    tracing::warn!(%tag, %error, "tag invalidation failed");
                    report.failed.push(tag.to_string());
                }
            }
        }

        span.record("failed", report.failed.len());

        tracing::info!(
            invalidated = report.invalidated.len(),
            failed = report.failed.len(),
            "revalidation dispatched"
        );

        report
    }

    /// Authorize and apply a commerce platform webhook.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not authorized or the body is not
    /// a catalog change notification.
    pub async fn handle_catalog_webhook(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<RevalidationReport, RevalidationError> {
        authorize(self.secret.as_ref(), authorization)?;

        let change: CatalogChange = serde_json::from_slice(body)?;

        Ok(self.on_catalog_change(change).await)
    }

    /// Authorize and apply a content platform webhook, routed by the
    /// payload's content type.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not authorized or the body is not
    /// JSON.
    pub async fn handle_content_webhook(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<RevalidationReport, RevalidationError> {
        self.content_webhook(authorization, body, ContentChange::from_webhook)
            .await
    }

    /// Authorize and apply a home page entry webhook.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not authorized or the body is not
    /// JSON.
    pub async fn handle_home_webhook(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<RevalidationReport, RevalidationError> {
        self.content_webhook(authorization, body, ContentChange::home_from_webhook)
            .await
    }

    /// Authorize and apply a category copy webhook.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not authorized or the body is not
    /// JSON.
    pub async fn handle_category_webhook(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<RevalidationReport, RevalidationError> {
        self.content_webhook(authorization, body, ContentChange::category_from_webhook)
            .await
    }

    async fn content_webhook(
        &self,
        authorization: Option<&str>,
        body: &[u8],
        read: fn(&Value) -> ContentChange,
    ) -> Result<RevalidationReport, RevalidationError> {
        authorize(self.secret.as_ref(), authorization)?;

        let payload: Value = serde_json::from_slice(body)?;

        Ok(self.on_content_change(read(&payload)).await)
    }
}

#[async_trait]
impl RevalidationService for CacheRevalidationService {
    #[tracing::instrument(name = "revalidation.service.on_catalog_change", skip(self))]
    async fn on_catalog_change(&self, change: CatalogChange) -> RevalidationReport {
        self.dispatch(plan_catalog_change(&change, &self.locales))
            .await
    }

    #[tracing::instrument(
        name = "revalidation.service.on_content_change",
        skip(self, change),
        fields(content_type = change.content_type.id())
    )]
    async fn on_content_change(&self, change: ContentChange) -> RevalidationReport {
        let tags = plan_content_change(&change, &self.locales);

        if tags.is_empty() {
            tracing::debug!("nothing to revalidate for content type");
        }

        self.dispatch(tags).await
    }
}

#[automock]
#[async_trait]
pub trait RevalidationService: Send + Sync {
    /// Invalidate everything a catalog change affects.
    async fn on_catalog_change(&self, change: CatalogChange) -> RevalidationReport;

    /// Invalidate everything a CMS change affects.
    async fn on_content_change(&self, change: ContentChange) -> RevalidationReport;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;
    use testresult::TestResult;
    use vitrine::{
        models::Product,
        tags::{CachePolicy, category, cms, product},
    };

    use crate::cache::{CacheError, MockCacheStore, TaggedCache};

    use super::*;

    fn recording_store() -> (MockCacheStore, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = MockCacheStore::new();

        let sink = Arc::clone(&seen);
        store.expect_invalidate().returning(move |tag| {
            sink.lock().expect("lock").push(tag.to_string());
            Ok(())
        });

        (store, seen)
    }

    #[tokio::test]
    async fn home_change_invalidates_featured_listings_in_every_locale() {
        let (store, seen) = recording_store();
        let service = CacheRevalidationService::new(Arc::new(store), Locale::ALL.to_vec());

        let report = service
            .on_content_change(ContentChange::home_with_featured(&["shoes", "bags"]))
            .await;

        assert!(report.is_complete());
        assert_eq!(report.invalidated.len(), 3 * Locale::ALL.len());

        let seen = seen.lock().expect("lock").clone();
        assert!(seen.contains(&"cms:home:de-DE".to_string()));
        assert!(seen.contains(&"plp:cat:bags:en-GB".to_string()));
    }

    #[tokio::test]
    async fn every_tag_is_attempted_when_some_fail() {
        let mut store = MockCacheStore::new();

        store
            .expect_invalidate()
            .times(4)
            .returning(|tag| {
                if tag.as_str().starts_with("products:") {
                    Err(CacheError::Poisoned)
                } else {
                    Ok(())
                }
            });

        let service = CacheRevalidationService::new(Arc::new(store), Locale::ALL.to_vec());

        let report = service.on_catalog_change(CatalogChange::default()).await;

        assert!(!report.is_complete());
        assert_eq!(report.failed, ["products:de-DE", "products:en-GB"]);
        assert_eq!(report.invalidated, ["categories:de-DE", "categories:en-GB"]);
    }

    #[tokio::test]
    async fn revalidation_is_idempotent() -> TestResult {
        let cache = Arc::new(TaggedCache::new());
        let service = CacheRevalidationService::new(cache.clone(), vec![Locale::EnGb]);

        cache.put(
            "product:p1:en-GB",
            &json!({ "id": "p1" }),
            TagSet::from_iter(product::revalidation("p1", Locale::EnGb)),
            CachePolicy::Products,
        )?;

        let change = CatalogChange {
            product_id: Some("p1".to_string()),
            category_slug: None,
        };

        let first = service.on_catalog_change(change.clone()).await;
        let second = service.on_catalog_change(change).await;

        assert_eq!(first.invalidated, second.invalidated);
        assert!(second.is_complete());
        assert!(cache.get::<Product>("product:p1:en-GB")?.is_none());
        assert_ne!(first.id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_content_type_dispatches_nothing() {
        let mut store = MockCacheStore::new();
        store.expect_invalidate().never();

        let service = CacheRevalidationService::new(Arc::new(store), Locale::ALL.to_vec());

        let report = service
            .on_content_change(ContentChange::from_webhook(
                &json!({ "sys": { "contentType": { "sys": { "id": "banner" } } } }),
            ))
            .await;

        assert!(report.invalidated.is_empty());
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn webhooks_require_the_configured_secret() {
        let mut store = MockCacheStore::new();
        store.expect_invalidate().never();

        let service = CacheRevalidationService::new(Arc::new(store), Locale::ALL.to_vec());

        let unconfigured = service
            .handle_catalog_webhook(Some("Bearer anything"), b"{}")
            .await;

        let service = service.with_secret(WebhookSecret::new("hush"));

        let wrong = service
            .handle_content_webhook(Some("Bearer nope"), b"{}")
            .await;

        assert_eq!(unconfigured.err().map(|error| error.status_code()), Some(401));
        assert_eq!(wrong.err().map(|error| error.status_code()), Some(401));
    }

    #[tokio::test]
    async fn authorized_webhooks_are_planned_and_dispatched() -> TestResult {
        let (store, seen) = recording_store();

        let service = CacheRevalidationService::new(Arc::new(store), vec![Locale::DeDe])
            .with_secret(WebhookSecret::new("hush"));

        let body = serde_json::to_vec(&json!({
            "sys": { "contentType": { "sys": { "id": "categoryContent" } } },
            "fields": { "slug": { "de-DE": "schuhe" } }
        }))?;

        let report = service
            .handle_content_webhook(Some("Bearer hush"), &body)
            .await?;

        assert_eq!(
            report.invalidated,
            [
                cms::category("schuhe", Locale::DeDe).to_string(),
                category::plp("schuhe", Locale::DeDe).to_string(),
            ]
        );
        assert_eq!(seen.lock().expect("lock").len(), 2);

        let malformed = service
            .handle_catalog_webhook(Some("Bearer hush"), b"not json")
            .await;

        assert_eq!(malformed.err().map(|error| error.status_code()), Some(400));

        Ok(())
    }

    #[tokio::test]
    async fn category_webhook_plans_copy_and_listing_for_every_locale() -> TestResult {
        let (store, seen) = recording_store();

        let service = CacheRevalidationService::new(Arc::new(store), Locale::ALL.to_vec())
            .with_secret(WebhookSecret::new("hush"));

        let body = serde_json::to_vec(&json!({
            "sys": { "contentType": { "sys": { "id": "category" } } },
            "fields": { "slug": { "de-DE": "schuhe", "en-GB": "shoes" } }
        }))?;

        let routed = service
            .handle_content_webhook(Some("Bearer hush"), &body)
            .await?;
        let dedicated = service
            .handle_category_webhook(Some("Bearer hush"), &body)
            .await?;

        assert_eq!(routed.invalidated.len(), 4);
        assert_eq!(routed.invalidated, dedicated.invalidated);
        assert!(
            seen.lock()
                .expect("lock")
                .contains(&category::plp("shoes", Locale::EnGb).to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn home_webhook_fans_out_without_a_content_type() -> TestResult {
        let (store, _seen) = recording_store();

        let service = CacheRevalidationService::new(Arc::new(store), vec![Locale::EnGb])
            .with_secret(WebhookSecret::new("hush"));

        let body = br#"{"fields":{"featuredCategorySlugs":{"en-GB":["shoes","bags"]}}}"#;

        let report = service
            .handle_home_webhook(Some("Bearer hush"), body)
            .await?;

        assert_eq!(
            report.invalidated,
            ["cms:home:en-GB", "plp:cat:bags:en-GB", "plp:cat:shoes:en-GB"]
        );

        let denied = service.handle_home_webhook(None, body).await;

        assert_eq!(denied.err().map(|error| error.status_code()), Some(401));

        Ok(())
    }
}
