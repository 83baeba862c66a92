//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    attributes::{AttributeValue, Resolved},
    context::StoreContext,
    dto::{
        CartDto, CategoryContentDto, CategoryDto, HomeDto, Page, PlpDto, ProductDto,
        ProductSummaryDto,
    },
    locale::{Country, Locale, LocaleError, negotiate},
    localized::{DEFAULT_FALLBACKS, LocalizedString},
    models::{
        Cart, CartAction, Category, CategoryContent, HomeContent, LineItem, Product, ProductPage,
        ProductVariant,
    },
    prices::{Amount, PriceView, ScopedPrice},
    pricing::{PriceContext, select_price},
    revalidation::{
        CatalogChange, ContentChange, ContentType, plan_catalog_change, plan_content_change,
    },
    tags::{CachePolicy, CacheTag, TagSet},
};
