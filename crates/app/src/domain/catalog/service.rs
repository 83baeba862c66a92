//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use vitrine::{
    context::StoreContext,
    dto::{
        CategoryDto, Page, PlpDto, ProductDto, ProductSummaryDto, build_category_tree,
        clamp_limit, clamp_offset,
    },
    models::{Category, Product, ProductPage},
    tags::{CachePolicy, TagSet, category, product},
};

use crate::{
    cache::TaggedCache,
    clients::{CommercePlatform, PlatformError, ProductQuery},
    domain::catalog::errors::CatalogServiceError,
};

/// Upper bound on the categories read for the navigation tree.
pub const CATEGORY_TREE_LIMIT: u32 = 500;

/// Catalog reads against the commerce platform, cached per locale under the
/// tags the revalidation planner invalidates.
#[derive(Clone)]
pub struct PlatformCatalogService {
    platform: Arc<dyn CommercePlatform>,
    cache: Arc<TaggedCache>,
}

impl PlatformCatalogService {
    #[must_use]
    pub fn new(platform: Arc<dyn CommercePlatform>, cache: Arc<TaggedCache>) -> Self {
        Self { platform, cache }
    }

    async fn category_by_slug(
        &self,
        ctx: &StoreContext,
        slug: &str,
    ) -> Result<Category, PlatformError> {
        let locale = ctx.locale;
        let tags = TagSet::from_iter([category::all(locale), category::by_slug(slug, locale)]);

        self.cache
            .get_or_load(
                &format!("category:{slug}:{locale}"),
                tags,
                CachePolicy::Categories,
                || async {
                    self.platform
                        .get_category_by_slug(slug, locale)
                        .await?
                        .ok_or(PlatformError::NotFound)
                },
            )
            .await
    }
}

#[async_trait]
impl CatalogService for PlatformCatalogService {
    #[tracing::instrument(
        name = "catalog.service.get_product",
        skip(self, ctx),
        fields(locale = %ctx.locale),
        err
    )]
    async fn get_product(
        &self,
        ctx: &StoreContext,
        product_id: &str,
    ) -> Result<ProductDto, CatalogServiceError> {
        let locale = ctx.locale;

        let product: Product = self
            .cache
            .get_or_load(
                &format!("product:{product_id}:{locale}"),
                TagSet::from_iter(product::revalidation(product_id, locale)),
                CachePolicy::Products,
                || self.platform.get_product(product_id),
            )
            .await?;

        Ok(ProductDto::project(&product, ctx))
    }

    #[tracing::instrument(
        name = "catalog.service.find_product_by_slug",
        skip(self, ctx),
        fields(locale = %ctx.locale),
        err
    )]
    async fn find_product_by_slug(
        &self,
        ctx: &StoreContext,
        slug: &str,
    ) -> Result<ProductDto, CatalogServiceError> {
        let locale = ctx.locale;

        let product: Product = self
            .cache
            .get_or_load(
                &format!("product-slug:{slug}:{locale}"),
                TagSet::from_iter([product::all(locale)]),
                CachePolicy::Products,
                || async {
                    self.platform
                        .find_product_by_slug(slug, locale)
                        .await?
                        .ok_or(PlatformError::NotFound)
                },
            )
            .await?;

        Ok(ProductDto::project(&product, ctx))
    }

    #[tracing::instrument(
        name = "catalog.service.list_products",
        skip(self, ctx),
        fields(locale = %ctx.locale),
        err
    )]
    async fn list_products(
        &self,
        ctx: &StoreContext,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Page<ProductSummaryDto>, CatalogServiceError> {
        let query = ProductQuery {
            locale: ctx.locale,
            limit: clamp_limit(limit),
            offset: clamp_offset(offset),
        };

        let page: ProductPage = self
            .cache
            .get_or_load(
                &format!("products:{}:{}:{}", query.locale, query.limit, query.offset),
                TagSet::from_iter([product::all(query.locale)]),
                CachePolicy::Products,
                || self.platform.list_products(query.clone()),
            )
            .await?;

        Ok(Page::project(&page, ctx))
    }

    #[tracing::instrument(
        name = "catalog.service.category_tree",
        skip(self, ctx),
        fields(locale = %ctx.locale, roots = tracing::field::Empty),
        err
    )]
    async fn category_tree(
        &self,
        ctx: &StoreContext,
    ) -> Result<Vec<CategoryDto>, CatalogServiceError> {
        let locale = ctx.locale;

        let categories: Vec<Category> = self
            .cache
            .get_or_load(
                &format!("categories:{locale}"),
                TagSet::from_iter([category::all(locale)]),
                CachePolicy::Categories,
                || self.platform.list_categories(CATEGORY_TREE_LIMIT),
            )
            .await?;

        let tree = build_category_tree(&categories, ctx);

        tracing::Span::current().record("roots", tree.len());

        Ok(tree)
    }

    #[tracing::instrument(
        name = "catalog.service.category_listing",
        skip(self, ctx),
        fields(locale = %ctx.locale, total = tracing::field::Empty),
        err
    )]
    async fn category_listing(
        &self,
        ctx: &StoreContext,
        slug: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<PlpDto, CatalogServiceError> {
        let locale = ctx.locale;
        let limit = clamp_limit(limit);
        let offset = clamp_offset(offset);

        let category = self.category_by_slug(ctx, slug).await?;

        let page: ProductPage = self
            .cache
            .get_or_load(
                &format!("plp:cat:{slug}:{locale}:{limit}:{offset}"),
                TagSet::from_iter([category::plp(slug, locale), product::all(locale)]),
                CachePolicy::Category,
                || {
                    self.platform
                        .list_products_by_category(&category.id, limit, offset)
                },
            )
            .await?;

        let listing = PlpDto::project(&category, slug, &page, ctx);

        tracing::Span::current().record("total", listing.page.total);

        Ok(listing)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a product by id.
    async fn get_product(
        &self,
        ctx: &StoreContext,
        product_id: &str,
    ) -> Result<ProductDto, CatalogServiceError>;

    /// Retrieve a product by its slug in the context locale.
    async fn find_product_by_slug(
        &self,
        ctx: &StoreContext,
        slug: &str,
    ) -> Result<ProductDto, CatalogServiceError>;

    /// List products sorted by name; limits are clamped to `1..=50`.
    async fn list_products(
        &self,
        ctx: &StoreContext,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Page<ProductSummaryDto>, CatalogServiceError>;

    /// Category tree with children sorted by name.
    async fn category_tree(
        &self,
        ctx: &StoreContext,
    ) -> Result<Vec<CategoryDto>, CatalogServiceError>;

    /// Product listing page of the category with `slug`.
    async fn category_listing(
        &self,
        ctx: &StoreContext,
        slug: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<PlpDto, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use vitrine::locale::Locale;

    use crate::{
        cache::CacheStore,
        clients::MockCommercePlatform,
        test::{
            InMemoryPlatform,
            fixtures::{category as category_fixture, page, product as product_fixture},
        },
    };

    use super::*;

    fn service(
        platform: impl CommercePlatform + 'static,
    ) -> (PlatformCatalogService, Arc<TaggedCache>) {
        let cache = Arc::new(TaggedCache::new());

        (
            PlatformCatalogService::new(Arc::new(platform), Arc::clone(&cache)),
            cache,
        )
    }

    #[tokio::test]
    async fn product_reads_are_cached_until_invalidated() -> TestResult {
        let mut platform = MockCommercePlatform::new();

        platform
            .expect_get_product()
            .withf(|id| id == "p1")
            .times(2)
            .returning(|id| Ok(product_fixture(id, "Boot")));

        let (catalog, cache) = service(platform);
        let ctx = StoreContext::new(Locale::DeDe);

        let first = catalog.get_product(&ctx, "p1").await?;
        let cached = catalog.get_product(&ctx, "p1").await?;

        assert_eq!(first, cached);
        assert_eq!(first.name, "Boot (DE)");

        cache.invalidate(&product::by_id("p1", Locale::DeDe)).await?;

        catalog.get_product(&ctx, "p1").await?;

        Ok(())
    }

    #[tokio::test]
    async fn locales_are_cached_separately() -> TestResult {
        let mut platform = MockCommercePlatform::new();

        platform
            .expect_get_product()
            .times(2)
            .returning(|id| Ok(product_fixture(id, "Boot")));

        let (catalog, _cache) = service(platform);

        let german = catalog
            .get_product(&StoreContext::new(Locale::DeDe), "p1")
            .await?;
        let english = catalog
            .get_product(&StoreContext::new(Locale::EnGb), "p1")
            .await?;

        let price = |dto: &ProductDto| {
            dto.variants
                .first()
                .and_then(|variant| variant.price.as_ref())
                .map(|price| price.cent_amount)
        };

        assert_eq!(price(&german), Some(1999));
        assert_eq!(price(&english), Some(1799));

        Ok(())
    }

    #[tokio::test]
    async fn missing_product_is_not_found_and_not_cached() -> TestResult {
        let mut platform = MockCommercePlatform::new();

        platform
            .expect_get_product()
            .times(2)
            .returning(|_| Err(PlatformError::NotFound));

        let (catalog, cache) = service(platform);
        let ctx = StoreContext::new(Locale::EnGb);

        let first = catalog.get_product(&ctx, "ghost").await;
        let second = catalog.get_product(&ctx, "ghost").await;

        assert!(matches!(first, Err(CatalogServiceError::NotFound)));
        assert!(matches!(second, Err(CatalogServiceError::NotFound)));
        assert_eq!(cache.len()?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let mut platform = MockCommercePlatform::new();

        platform
            .expect_find_product_by_slug()
            .returning(|_, _| Ok(None));

        let (catalog, _cache) = service(platform);

        let result = catalog
            .find_product_by_slug(&StoreContext::new(Locale::EnGb), "nope")
            .await;

        assert!(matches!(result, Err(CatalogServiceError::NotFound)));
    }

    #[tokio::test]
    async fn product_published_after_a_miss_is_found() -> TestResult {
        let mut platform = MockCommercePlatform::new();
        let mut sequence = mockall::Sequence::new();

        platform
            .expect_find_product_by_slug()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(None));
        platform
            .expect_find_product_by_slug()
            .withf(|slug, locale| slug == "boot" && *locale == Locale::EnGb)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(Some(product_fixture("p1", "Boot"))));

        let (catalog, cache) = service(platform);
        let ctx = StoreContext::new(Locale::EnGb);

        let missing = catalog.find_product_by_slug(&ctx, "boot").await;

        assert!(matches!(missing, Err(CatalogServiceError::NotFound)));
        assert_eq!(cache.len()?, 0);

        let found = catalog.find_product_by_slug(&ctx, "boot").await?;

        assert_eq!(found.id, "p1");
        assert_eq!(cache.len()?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn listing_limits_are_clamped_before_the_platform_call() -> TestResult {
        let mut platform = MockCommercePlatform::new();

        platform
            .expect_list_products()
            .withf(|query| query.limit == 50 && query.offset == 0 && query.locale == Locale::EnGb)
            .times(1)
            .returning(|_| Ok(page(vec![product_fixture("p1", "Boot")])));

        let (catalog, _cache) = service(platform);

        let listing = catalog
            .list_products(&StoreContext::new(Locale::EnGb), Some(999), Some(-3))
            .await?;

        assert_eq!(listing.total, 1);
        assert_eq!(
            listing.items.first().and_then(|item| item.image_url.as_deref()),
            Some("https://cdn.example/p1.jpg")
        );

        Ok(())
    }

    #[tokio::test]
    async fn category_tree_nests_children() -> TestResult {
        let platform = InMemoryPlatform::new();

        platform.seed_categories(vec![
            category_fixture("c2", "shoes", Some("c1")),
            category_fixture("c1", "women", None),
            category_fixture("c3", "bags", Some("c1")),
        ]);

        let (catalog, _cache) = service(platform);

        let tree = catalog
            .category_tree(&StoreContext::new(Locale::EnGb))
            .await?;

        assert_eq!(tree.len(), 1);

        let children: Vec<&str> = tree
            .iter()
            .flat_map(|root| root.children.iter().map(|child| child.slug.as_str()))
            .collect();

        assert_eq!(children, ["bags", "shoes"]);

        Ok(())
    }

    #[tokio::test]
    async fn category_listing_reads_products_of_the_category() -> TestResult {
        let platform = InMemoryPlatform::new();

        let mut boot = product_fixture("p1", "Boot");
        boot.category_ids = vec!["c1".to_string()];

        platform.seed_categories(vec![category_fixture("c1", "shoes", None)]);
        platform.seed_products(vec![boot, product_fixture("p2", "Hat")]);

        let (catalog, cache) = service(platform);
        let ctx = StoreContext::new(Locale::DeDe);

        let listing = catalog.category_listing(&ctx, "shoes", None, None).await?;

        assert_eq!(listing.category_id, "c1");
        assert_eq!(listing.page.total, 1);
        assert_eq!(listing.page.limit, 24);
        assert_eq!(
            cache.invalidate_tag(&category::plp("shoes", Locale::DeDe))?,
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn category_listing_of_unknown_slug_is_not_found() {
        let (catalog, _cache) = service(InMemoryPlatform::new());

        let result = catalog
            .category_listing(&StoreContext::new(Locale::EnGb), "ghost", None, None)
            .await;

        assert!(matches!(result, Err(CatalogServiceError::NotFound)));
    }

    #[tokio::test]
    async fn unknown_category_slugs_leave_nothing_cached() -> TestResult {
        let platform = InMemoryPlatform::new();
        let (catalog, cache) = service(platform.clone());
        let ctx = StoreContext::new(Locale::EnGb);

        for attempt in 0..5 {
            let result = catalog
                .category_listing(&ctx, &format!("nope-{attempt}"), None, None)
                .await;

            assert!(matches!(result, Err(CatalogServiceError::NotFound)));
        }

        let missing = catalog.category_listing(&ctx, "shoes", None, None).await;

        assert!(matches!(missing, Err(CatalogServiceError::NotFound)));
        assert_eq!(cache.len()?, 0);

        platform.seed_categories(vec![category_fixture("c1", "shoes", None)]);

        let listing = catalog.category_listing(&ctx, "shoes", None, None).await?;

        assert_eq!(listing.category_id, "c1");

        Ok(())
    }
}
