//! Content service.

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use vitrine::{
    context::StoreContext,
    dto::{CategoryContentDto, HomeDto},
    models::{CategoryContent, HomeContent},
    tags::{CachePolicy, TagSet, cms},
};

use crate::{
    cache::TaggedCache,
    clients::{ContentError, ContentPlatform},
    domain::content::errors::ContentServiceError,
};

/// Editorial reads against the content platform. Published entries are
/// cached; preview reads always go upstream.
#[derive(Clone)]
pub struct PlatformContentService {
    content: Arc<dyn ContentPlatform>,
    cache: Arc<TaggedCache>,
}

impl PlatformContentService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentPlatform>, cache: Arc<TaggedCache>) -> Self {
        Self { content, cache }
    }

    async fn read<T, F, Fut>(
        &self,
        ctx: &StoreContext,
        key: &str,
        tags: TagSet,
        policy: CachePolicy,
        load: F,
    ) -> Result<T, ContentError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ContentError>>,
    {
        if ctx.preview {
            return load().await;
        }

        self.cache.get_or_load(key, tags, policy, load).await
    }
}

#[async_trait]
impl ContentService for PlatformContentService {
    #[tracing::instrument(
        name = "content.service.home",
        skip(self, ctx),
        fields(locale = %ctx.locale, preview = ctx.preview, found = tracing::field::Empty),
        err
    )]
    async fn home(&self, ctx: &StoreContext) -> Result<HomeDto, ContentServiceError> {
        let locale = ctx.locale;

        let entry: Option<HomeContent> = self
            .read(
                ctx,
                &format!("cms:home:{locale}"),
                TagSet::from_iter([cms::home(locale)]),
                CachePolicy::Home,
                || self.content.get_home_content(locale, ctx.preview),
            )
            .await?;

        tracing::Span::current().record("found", entry.is_some());

        Ok(HomeDto::project(&entry.unwrap_or_default()))
    }

    #[tracing::instrument(
        name = "content.service.category_content",
        skip(self, ctx),
        fields(locale = %ctx.locale, preview = ctx.preview),
        err
    )]
    async fn category_content(
        &self,
        ctx: &StoreContext,
        slug: &str,
    ) -> Result<Option<CategoryContentDto>, ContentServiceError> {
        let locale = ctx.locale;

        let entry: Option<CategoryContent> = self
            .read(
                ctx,
                &format!("cms:categories:{slug}:{locale}"),
                TagSet::from_iter([cms::category(slug, locale)]),
                CachePolicy::Category,
                || self.content.get_category_content(slug, locale, ctx.preview),
            )
            .await?;

        Ok(entry.as_ref().map(CategoryContentDto::project))
    }
}

#[automock]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Home page content; defaults fill in when no entry is published.
    async fn home(&self, ctx: &StoreContext) -> Result<HomeDto, ContentServiceError>;

    /// Copy of the category with `slug`, if any.
    async fn category_content(
        &self,
        ctx: &StoreContext,
        slug: &str,
    ) -> Result<Option<CategoryContentDto>, ContentServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use vitrine::locale::Locale;

    use crate::{
        cache::CacheStore,
        clients::MockContentPlatform,
        test::fixtures::{category_content, home},
    };

    use super::*;

    fn service(content: MockContentPlatform) -> PlatformContentService {
        PlatformContentService::new(Arc::new(content), Arc::new(TaggedCache::new()))
    }

    #[tokio::test]
    async fn missing_home_entry_projects_defaults() -> TestResult {
        let mut content = MockContentPlatform::new();

        content
            .expect_get_home_content()
            .times(1)
            .returning(|_, _| Ok(None));

        let dto = service(content).home(&StoreContext::new(Locale::EnGb)).await?;

        assert_eq!(dto.hero.title, "Composable Storefront on Vercel");
        assert!(dto.featured_category_slugs.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn published_home_is_cached_per_locale() -> TestResult {
        let mut content = MockContentPlatform::new();

        content
            .expect_get_home_content()
            .withf(|locale, preview| *locale == Locale::DeDe && !preview)
            .times(1)
            .returning(|_, _| Ok(Some(home(&["schuhe"]))));

        let content = service(content);
        let ctx = StoreContext::new(Locale::DeDe);

        content.home(&ctx).await?;
        let cached = content.home(&ctx).await?;

        assert_eq!(cached.hero.title, "Spring");
        assert_eq!(cached.featured_category_slugs, ["schuhe"]);

        Ok(())
    }

    #[tokio::test]
    async fn preview_reads_bypass_the_cache() -> TestResult {
        let mut content = MockContentPlatform::new();

        content
            .expect_get_home_content()
            .withf(|_, preview| *preview)
            .times(2)
            .returning(|_, _| Ok(Some(home(&[]))));

        let content = service(content);
        let ctx = StoreContext::new(Locale::EnGb).with_preview(true);

        content.home(&ctx).await?;
        content.home(&ctx).await?;

        Ok(())
    }

    #[tokio::test]
    async fn category_copy_is_invalidated_by_its_tag() -> TestResult {
        let mut content = MockContentPlatform::new();

        content
            .expect_get_category_content()
            .withf(|slug, _, _| slug == "shoes")
            .times(2)
            .returning(|slug, _, _| Ok(Some(category_content(slug))));

        let cache = Arc::new(TaggedCache::new());
        let service = PlatformContentService::new(Arc::new(content), Arc::clone(&cache));
        let ctx = StoreContext::new(Locale::EnGb);

        let copy = service.category_content(&ctx, "shoes").await?;
        assert_eq!(copy.map(|dto| dto.excerpt), Some("All things shoes".to_string()));

        service.category_content(&ctx, "shoes").await?;
        cache.invalidate(&cms::category("shoes", Locale::EnGb)).await?;
        service.category_content(&ctx, "shoes").await?;

        Ok(())
    }

    #[tokio::test]
    async fn upstream_failures_propagate() {
        let mut content = MockContentPlatform::new();

        content
            .expect_get_category_content()
            .returning(|_, _, _| Err(ContentError::Upstream("timeout".to_string())));

        let result = service(content)
            .category_content(&StoreContext::new(Locale::EnGb), "shoes")
            .await;

        assert!(matches!(result, Err(ContentServiceError::Upstream(_))));
        assert_eq!(result.err().map(|error| error.status_code()), Some(502));
    }
}
