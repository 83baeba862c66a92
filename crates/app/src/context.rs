//! App Context

use std::sync::Arc;

use vitrine::{context::StoreContext, locale::Locale};

use crate::{
    cache::{CacheStore, LayeredStore, PurgeClient, TaggedCache},
    clients::{CommercePlatform, ContentPlatform},
    config::AppConfig,
    domain::{
        carts::{CartsService, PlatformCartsService},
        catalog::{CatalogService, PlatformCatalogService},
        content::{ContentService, PlatformContentService},
        pages::{PagesService, StorefrontPagesService},
        revalidation::CacheRevalidationService,
    },
};

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub content: Arc<dyn ContentService>,
    pub pages: Arc<dyn PagesService>,
    pub revalidation: CacheRevalidationService,
    pub default_locale: Locale,
}

impl AppContext {
    /// Wire the services over the given platform clients.
    ///
    /// Reads share one in-process cache. Revalidations invalidate it and, when
    /// a purge endpoint is configured, the edge cache as well.
    #[must_use]
    pub fn new(
        commerce: Arc<dyn CommercePlatform>,
        content_platform: Arc<dyn ContentPlatform>,
        config: &AppConfig,
    ) -> Self {
        let cache = Arc::new(TaggedCache::new());

        let catalog: Arc<dyn CatalogService> = Arc::new(PlatformCatalogService::new(
            Arc::clone(&commerce),
            Arc::clone(&cache),
        ));

        let content: Arc<dyn ContentService> = Arc::new(PlatformContentService::new(
            content_platform,
            Arc::clone(&cache),
        ));

        let local: Arc<dyn CacheStore> = cache;

        let store: Arc<dyn CacheStore> = match config.purge.purge_config() {
            Some(purge) => {
                let edge: Arc<dyn CacheStore> = Arc::new(PurgeClient::new(purge));
                Arc::new(LayeredStore::new(vec![local, edge]))
            }
            None => local,
        };

        let mut revalidation = CacheRevalidationService::new(store, Locale::ALL.to_vec());

        if let Some(secret) = config.webhooks.secret() {
            revalidation = revalidation.with_secret(secret);
        }

        Self {
            carts: Arc::new(PlatformCartsService::new(
                commerce,
                config.carts.retry_policy(),
            )),
            pages: Arc::new(StorefrontPagesService::new(
                Arc::clone(&catalog),
                Arc::clone(&content),
            )),
            catalog,
            content,
            revalidation,
            default_locale: config.store.default_locale,
        }
    }

    /// Request context from the locale cookie and `Accept-Language` header.
    #[must_use]
    pub fn store_context(
        &self,
        cookie: Option<&str>,
        accept_language: Option<&str>,
    ) -> StoreContext {
        StoreContext::resolve(cookie, accept_language, self.default_locale)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use crate::{
        clients::{MockCommercePlatform, MockContentPlatform},
        test::fixtures::product,
    };

    use super::*;

    fn context(commerce: MockCommercePlatform, args: &[&str]) -> TestResult<AppContext> {
        let config = AppConfig::try_parse_from(args)?;

        Ok(AppContext::new(
            Arc::new(commerce),
            Arc::new(MockContentPlatform::new()),
            &config,
        ))
    }

    #[test]
    fn store_context_uses_configured_default() -> TestResult {
        let app = context(
            MockCommercePlatform::new(),
            &["vitrine-app", "--default-locale", "de-DE"],
        )?;

        assert_eq!(app.store_context(None, None).locale, Locale::DeDe);
        assert_eq!(app.store_context(Some("en-GB"), None).locale, Locale::EnGb);

        Ok(())
    }

    #[tokio::test]
    async fn catalog_webhook_drops_cached_reads() -> TestResult {
        let mut commerce = MockCommercePlatform::new();

        commerce
            .expect_get_product()
            .times(2)
            .returning(|id| Ok(product(id, "Boot")));

        let app = context(commerce, &["vitrine-app", "--revalidate-secret", "hush"])?;
        let ctx = app.store_context(None, None);

        app.catalog.get_product(&ctx, "p1").await?;
        app.catalog.get_product(&ctx, "p1").await?;

        let report = app
            .revalidation
            .handle_catalog_webhook(Some("Bearer hush"), br#"{"productId":"p1"}"#)
            .await?;

        assert!(report.is_complete());
        assert!(report.invalidated.contains(&"product:p1:en-GB".to_string()));

        app.catalog.get_product(&ctx, "p1").await?;

        Ok(())
    }
}
