//! Cache tags
//!
//! Every cached read is stored under one or more tags and every write
//! invalidates by tag. Tags are produced only here so that a writer and an
//! unrelated reader always compute the same key for the same resource.
//!
//! The taxonomy is `{resource}:{locale}` for collections and
//! `{resource}:{identifier}:{locale}` for items. Identifiers are used verbatim;
//! callers pass canonical slugs and ids. Each resource kind has its own literal
//! prefix, so tags of different kinds never collide.

use std::fmt;

use serde::Serialize;

use crate::locale::Locale;

mod set;

pub use set::TagSet;

/// An opaque cache invalidation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheTag(String);

impl CacheTag {
    fn collection(resource: &str, locale: Locale) -> Self {
        Self(format!("{resource}:{locale}"))
    }

    fn item(resource: &str, identifier: &str, locale: Locale) -> Self {
        Self(format!("{resource}:{identifier}:{locale}"))
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product tags.
pub mod product {
    use super::{CacheTag, Locale};

    /// All products in a locale: product listings, home page recommendations.
    pub fn all(locale: Locale) -> CacheTag {
        CacheTag::collection("products", locale)
    }

    /// A single product: product detail.
    pub fn by_id(id: &str, locale: Locale) -> CacheTag {
        CacheTag::item("product", id, locale)
    }

    /// Tags to invalidate when a product changes.
    pub fn revalidation(id: &str, locale: Locale) -> [CacheTag; 2] {
        [all(locale), by_id(id, locale)]
    }
}

/// Category tags.
pub mod category {
    use super::{CacheTag, Locale};

    /// All categories in a locale: category tree, navigation.
    pub fn all(locale: Locale) -> CacheTag {
        CacheTag::collection("categories", locale)
    }

    /// A single category.
    pub fn by_slug(slug: &str, locale: Locale) -> CacheTag {
        CacheTag::item("category", slug, locale)
    }

    /// The product listing page of a category.
    pub fn plp(slug: &str, locale: Locale) -> CacheTag {
        CacheTag::item("plp:cat", slug, locale)
    }

    /// Tags to invalidate when a category changes.
    pub fn revalidation(slug: &str, locale: Locale) -> [CacheTag; 3] {
        [all(locale), by_slug(slug, locale), plp(slug, locale)]
    }
}

/// CMS content tags.
pub mod cms {
    use super::{CacheTag, Locale};

    /// Kind of CMS entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ContentKind {
        /// Home page.
        Home,

        /// Category copy.
        Category,
    }

    /// Home page content.
    pub fn home(locale: Locale) -> CacheTag {
        CacheTag::collection("cms:home", locale)
    }

    /// Category copy.
    pub fn category(slug: &str, locale: Locale) -> CacheTag {
        CacheTag::item("cms:categories", slug, locale)
    }

    /// Tags to invalidate when CMS content changes. Category copy without a
    /// slug has nothing to invalidate.
    pub fn revalidation(kind: ContentKind, slug: Option<&str>, locale: Locale) -> Vec<CacheTag> {
        match (kind, slug) {
            (ContentKind::Home, _) => vec![home(locale)],
            (ContentKind::Category, Some(slug)) => vec![category(slug, locale)],
            (ContentKind::Category, None) => Vec::new(),
        }
    }
}

/// How long a cached read stays fresh before it is refetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Home page content.
    Home,

    /// Category product listings.
    Category,

    /// Navigation and layout.
    Layout,

    /// Product lists.
    Products,

    /// Category tree.
    Categories,
}

impl CachePolicy {
    /// Freshness window in seconds.
    pub fn revalidate_seconds(self) -> u64 {
        match self {
            CachePolicy::Home | CachePolicy::Products => 300,
            CachePolicy::Category => 600,
            CachePolicy::Layout | CachePolicy::Categories => 3600,
        }
    }
}
