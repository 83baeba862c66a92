//! Response projections
//!
//! Locale- and currency-scoped views assembled from platform models. Every
//! projection is a pure function of its inputs and a [`StoreContext`].
//!
//! [`StoreContext`]: crate::context::StoreContext

use serde::Serialize;

use crate::{
    context::StoreContext,
    models::{Category, ProductPage},
};

pub mod cart;
pub mod category;
pub mod content;
pub mod product;

pub use cart::{CartDto, CartLineItemDto};
pub use category::{CategoryDto, build_category_tree, showcase};
pub use content::{CategoryContentDto, HeroDto, HomeDto};
pub use product::{
    AttributeDto, ImageDto, ProductDto, ProductSummaryDto, Specification, VariantDto,
};

/// Default listing page size.
pub const DEFAULT_PAGE_LIMIT: u32 = 24;

/// Largest listing page size.
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Clamp a requested page size to `1..=50`, defaulting to 24.
pub fn clamp_limit(requested: Option<i64>) -> u32 {
    requested.map_or(DEFAULT_PAGE_LIMIT, |limit| {
        u32::try_from(limit.clamp(1, i64::from(MAX_PAGE_LIMIT))).unwrap_or(DEFAULT_PAGE_LIMIT)
    })
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(requested: Option<i64>) -> u32 {
    requested.map_or(0, |offset| {
        u32::try_from(offset.clamp(0, i64::from(u32::MAX))).unwrap_or(0)
    })
}

/// Upgrade protocol-relative URLs to `https:`.
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// A page of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Total number of matching items.
    pub total: u64,

    /// Page size.
    pub limit: u32,

    /// Page offset.
    pub offset: u32,
}

impl Page<ProductSummaryDto> {
    /// Project a platform product page into summaries.
    pub fn project(page: &ProductPage, ctx: &StoreContext) -> Self {
        let items: Vec<ProductSummaryDto> = page
            .results
            .iter()
            .map(|product| ProductSummaryDto::project(product, ctx))
            .collect();

        Self {
            total: page
                .total
                .unwrap_or_else(|| u64::try_from(items.len()).unwrap_or(u64::MAX)),
            items,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// Product listing page of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlpDto {
    /// Category id.
    pub category_id: String,

    /// Category slug as requested.
    pub category_slug: String,

    /// Products.
    #[serde(flatten)]
    pub page: Page<ProductSummaryDto>,
}

impl PlpDto {
    /// Project a listing page of `category`, keeping the slug the client asked
    /// for.
    pub fn project(category: &Category, slug: &str, page: &ProductPage, ctx: &StoreContext) -> Self {
        Self {
            category_id: category.id.clone(),
            category_slug: slug.to_string(),
            page: Page::project(page, ctx),
        }
    }
}
