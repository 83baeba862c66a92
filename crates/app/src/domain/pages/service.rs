//! Pages service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use vitrine::{
    context::StoreContext,
    dto::{CategoryDto, HomeDto, showcase},
    models::HomeContent,
};

use crate::domain::{
    catalog::CatalogService,
    content::ContentService,
    pages::{
        errors::PagesServiceError,
        models::{CategoryPageDto, HomePageDto},
    },
};

/// Categories shown on the home page when none are featured.
pub const SHOWCASE_LIMIT: usize = 8;

/// Products in the home page recommendations strip.
pub const RECOMMENDED_LIMIT: i64 = 8;

/// Composes page aggregates. Catalog failures fail the page; content failures
/// degrade to defaults.
#[derive(Clone)]
pub struct StorefrontPagesService {
    catalog: Arc<dyn CatalogService>,
    content: Arc<dyn ContentService>,
}

impl StorefrontPagesService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogService>, content: Arc<dyn ContentService>) -> Self {
        Self { catalog, content }
    }

    async fn with_copy(&self, ctx: &StoreContext, category: CategoryDto) -> CategoryDto {
        match self.content.category_content(ctx, &category.slug).await {
            Ok(Some(copy)) => category.with_content(copy),
            Ok(None) => category,
            Err(error) => {
                tracing::warn!(slug = %category.slug, %error, "category copy unavailable");
                category
            }
        }
    }
}

#[async_trait]
impl PagesService for StorefrontPagesService {
    #[tracing::instrument(
        name = "pages.service.home_page",
        skip(self, ctx),
        fields(locale = %ctx.locale, showcased = tracing::field::Empty),
        err
    )]
    async fn home_page(&self, ctx: &StoreContext) -> Result<HomePageDto, PagesServiceError> {
        let (home, tree, recommended) = tokio::join!(
            self.content.home(ctx),
            self.catalog.category_tree(ctx),
            self.catalog.list_products(ctx, Some(RECOMMENDED_LIMIT), None),
        );

        let home = home.unwrap_or_else(|error| {
            tracing::warn!(%error, "home content unavailable, using defaults");
            HomeDto::project(&HomeContent::default())
        });

        let tree = tree?;
        let recommended = recommended?;

        let mut showcased = Vec::new();

        for category in showcase(&tree, &home.featured_category_slugs, SHOWCASE_LIMIT) {
            showcased.push(self.with_copy(ctx, category).await);
        }

        tracing::Span::current().record("showcased", showcased.len());

        Ok(HomePageDto {
            home,
            showcase: showcased,
            recommended,
        })
    }

    #[tracing::instrument(
        name = "pages.service.category_page",
        skip(self, ctx),
        fields(locale = %ctx.locale),
        err
    )]
    async fn category_page(
        &self,
        ctx: &StoreContext,
        slug: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<CategoryPageDto, PagesServiceError> {
        let (listing, content) = tokio::join!(
            self.catalog.category_listing(ctx, slug, limit, offset),
            self.content.category_content(ctx, slug),
        );

        let content = content.unwrap_or_else(|error| {
            tracing::warn!(%error, "category copy unavailable");
            None
        });

        Ok(CategoryPageDto {
            listing: listing?,
            content,
        })
    }
}

#[automock]
#[async_trait]
pub trait PagesService: Send + Sync {
    /// Home page: content, showcased categories and recommendations, read
    /// concurrently.
    async fn home_page(&self, ctx: &StoreContext) -> Result<HomePageDto, PagesServiceError>;

    /// Category listing and its copy, read concurrently.
    async fn category_page(
        &self,
        ctx: &StoreContext,
        slug: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<CategoryPageDto, PagesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use vitrine::{
        dto::{CategoryContentDto, Page, PlpDto, ProductSummaryDto, build_category_tree},
        locale::Locale,
    };

    use crate::{
        clients::{ContentError, PlatformError},
        domain::{
            catalog::{CatalogServiceError, MockCatalogService},
            content::{ContentServiceError, MockContentService},
        },
        test::fixtures::{category, category_content, home, page, product},
    };

    use super::*;

    fn tree() -> Vec<CategoryDto> {
        build_category_tree(
            &[
                category("c1", "women", None),
                category("c2", "shoes", Some("c1")),
                category("c3", "men", None),
            ],
            &StoreContext::new(Locale::EnGb),
        )
    }

    fn service(catalog: MockCatalogService, content: MockContentService) -> StorefrontPagesService {
        StorefrontPagesService::new(Arc::new(catalog), Arc::new(content))
    }

    fn recommended() -> Page<ProductSummaryDto> {
        Page::project(
            &page(vec![product("p1", "Boot")]),
            &StoreContext::new(Locale::EnGb),
        )
    }

    #[tokio::test]
    async fn home_page_showcases_featured_categories_with_copy() -> TestResult {
        let mut catalog = MockCatalogService::new();
        let mut content = MockContentService::new();

        catalog.expect_category_tree().returning(|_| Ok(tree()));
        catalog
            .expect_list_products()
            .withf(|_, limit, offset| *limit == Some(RECOMMENDED_LIMIT) && offset.is_none())
            .returning(|_, _, _| Ok(recommended()));

        content
            .expect_home()
            .returning(|_| Ok(HomeDto::project(&home(&["shoes"]))));
        content
            .expect_category_content()
            .withf(|_, slug| slug == "shoes")
            .times(1)
            .returning(|_, slug| Ok(Some(CategoryContentDto::project(&category_content(slug)))));

        let page = service(catalog, content)
            .home_page(&StoreContext::new(Locale::EnGb))
            .await?;

        assert_eq!(page.home.hero.title, "Spring");
        assert_eq!(page.showcase.len(), 1);
        assert_eq!(
            page.showcase
                .first()
                .and_then(|category| category.content.as_ref())
                .map(|copy| copy.excerpt.as_str()),
            Some("All things shoes")
        );
        assert_eq!(page.recommended.total, 1);

        Ok(())
    }

    #[tokio::test]
    async fn home_page_survives_content_outage() -> TestResult {
        let mut catalog = MockCatalogService::new();
        let mut content = MockContentService::new();

        catalog.expect_category_tree().returning(|_| Ok(tree()));
        catalog
            .expect_list_products()
            .returning(|_, _, _| Ok(recommended()));

        content.expect_home().returning(|_| {
            Err(ContentServiceError::Upstream(ContentError::Upstream(
                "down".to_string(),
            )))
        });
        content.expect_category_content().returning(|_, _| {
            Err(ContentServiceError::Upstream(ContentError::Upstream(
                "down".to_string(),
            )))
        });

        let page = service(catalog, content)
            .home_page(&StoreContext::new(Locale::EnGb))
            .await?;

        assert_eq!(page.home.hero.title, "Composable Storefront on Vercel");
        assert_eq!(
            page.showcase.iter().map(|c| c.slug.as_str()).collect::<Vec<_>>(),
            ["men", "women", "shoes"]
        );
        assert!(page.showcase.iter().all(|category| category.content.is_none()));

        Ok(())
    }

    #[tokio::test]
    async fn home_page_fails_on_catalog_failure() {
        let mut catalog = MockCatalogService::new();
        let mut content = MockContentService::new();

        catalog.expect_category_tree().returning(|_| {
            Err(CatalogServiceError::Upstream(PlatformError::Upstream(
                "503".to_string(),
            )))
        });
        catalog
            .expect_list_products()
            .returning(|_, _, _| Ok(recommended()));
        content
            .expect_home()
            .returning(|_| Ok(HomeDto::project(&home(&[]))));

        let result = service(catalog, content)
            .home_page(&StoreContext::new(Locale::EnGb))
            .await;

        assert_eq!(result.err().map(|error| error.status_code()), Some(502));
    }

    #[tokio::test]
    async fn category_page_joins_listing_and_copy() -> TestResult {
        let mut catalog = MockCatalogService::new();
        let mut content = MockContentService::new();

        catalog
            .expect_category_listing()
            .withf(|_, slug, limit, _| slug == "shoes" && *limit == Some(12))
            .returning(|ctx, slug, _, _| {
                Ok(PlpDto::project(
                    &category("c2", slug, None),
                    slug,
                    &page(vec![product("p1", "Boot")]),
                    ctx,
                ))
            });
        content
            .expect_category_content()
            .returning(|_, slug| Ok(Some(CategoryContentDto::project(&category_content(slug)))));

        let page = service(catalog, content)
            .category_page(&StoreContext::new(Locale::DeDe), "shoes", Some(12), None)
            .await?;

        assert_eq!(page.listing.category_id, "c2");
        assert_eq!(page.content.map(|copy| copy.slug), Some("shoes".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_page_is_not_found() {
        let mut catalog = MockCatalogService::new();
        let mut content = MockContentService::new();

        catalog
            .expect_category_listing()
            .returning(|_, _, _, _| Err(CatalogServiceError::NotFound));
        content.expect_category_content().returning(|_, _| Ok(None));

        let result = service(catalog, content)
            .category_page(&StoreContext::new(Locale::EnGb), "ghost", None, None)
            .await;

        assert_eq!(result.err().map(|error| error.status_code()), Some(404));
    }
}
