//! Revalidation planning
//!
//! Computes the exact set of cache tags a change notification must
//! invalidate, across every supported locale. Planning is pure; dispatching
//! the invalidations is left to the caller.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    locale::Locale,
    tags::{TagSet, category, cms, product},
};

/// Change notification from the commerce platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogChange {
    /// Changed product, if known.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Changed category slug, if known.
    #[serde(default)]
    pub category_slug: Option<String>,
}

/// CMS content type of a changed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    /// The home page entry (`homepage`).
    Home,

    /// Category copy (`category`, or the legacy `categoryContent`).
    Category,

    /// Any other content type.
    Other(String),
}

impl ContentType {
    /// Map a CMS content type id.
    pub fn from_id(id: &str) -> Self {
        match id {
            "homepage" => ContentType::Home,
            "category" | "categoryContent" => ContentType::Category,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// CMS content type id.
    pub fn id(&self) -> &str {
        match self {
            ContentType::Home => "homepage",
            ContentType::Category => "category",
            ContentType::Other(id) => id,
        }
    }
}

/// Change notification from the content platform.
///
/// For home page changes the slugs are the featured category slugs; for
/// category copy they are the entry's own slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    /// Changed content type.
    pub content_type: ContentType,

    /// Affected category slugs per locale.
    pub slugs_by_locale: FxHashMap<Locale, Vec<String>>,
}

impl ContentChange {
    /// A change with no affected slugs.
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            slugs_by_locale: FxHashMap::default(),
        }
    }

    /// A home page change referencing the same featured slugs in every
    /// supported locale.
    pub fn home_with_featured<S: Into<String> + Clone>(slugs: &[S]) -> Self {
        let mut change = Self::new(ContentType::Home);

        for locale in Locale::ALL {
            change
                .slugs_by_locale
                .insert(locale, slugs.iter().cloned().map(Into::into).collect());
        }

        change
    }

    /// Set the affected slugs for one locale.
    #[must_use]
    pub fn with_slugs(mut self, locale: Locale, slugs: Vec<String>) -> Self {
        self.slugs_by_locale.insert(locale, slugs);
        self
    }

    /// Read a CMS webhook payload.
    ///
    /// The content type comes from `sys.contentType.sys.id`. Home entries
    /// contribute `fields.featuredCategorySlugs[locale]`, category entries
    /// `fields.slug[locale]`. Missing or malformed fields mean no slugs.
    pub fn from_webhook(payload: &Value) -> Self {
        let content_type = payload
            .pointer("/sys/contentType/sys/id")
            .and_then(Value::as_str)
            .map_or_else(|| ContentType::Other("unknown".to_string()), ContentType::from_id);

        Self::read_as(content_type, payload)
    }

    /// Read a payload known to describe the home page entry, whatever its
    /// declared content type.
    pub fn home_from_webhook(payload: &Value) -> Self {
        Self::read_as(ContentType::Home, payload)
    }

    /// Read a payload known to describe category copy, whatever its declared
    /// content type.
    pub fn category_from_webhook(payload: &Value) -> Self {
        Self::read_as(ContentType::Category, payload)
    }

    fn read_as(content_type: ContentType, payload: &Value) -> Self {
        let mut change = Self::new(content_type);

        for locale in Locale::ALL {
            let field = |name: &str| {
                payload
                    .get("fields")
                    .and_then(|fields| fields.get(name))
                    .and_then(|field| field.get(locale.as_str()))
            };

            let slugs = match change.content_type {
                ContentType::Home => field("featuredCategorySlugs")
                    .and_then(Value::as_array)
                    .map(|slugs| {
                        slugs
                            .iter()
                            .filter_map(Value::as_str)
                            .filter(|slug| !slug.is_empty())
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                    }),
                ContentType::Category => field("slug")
                    .and_then(Value::as_str)
                    .filter(|slug| !slug.is_empty())
                    .map(|slug| vec![slug.to_string()]),
                ContentType::Other(_) => None,
            };

            if let Some(slugs) = slugs {
                change.slugs_by_locale.insert(locale, slugs);
            }
        }

        change
    }

    fn slugs(&self, locale: Locale) -> &[String] {
        self.slugs_by_locale
            .get(&locale)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Tags to invalidate for a catalog change.
///
/// Every locale loses its product and category collections; a known product
/// adds its item tag, a known category slug adds its item and listing tags.
pub fn plan_catalog_change(change: &CatalogChange, locales: &[Locale]) -> TagSet {
    let mut tags = TagSet::new();

    for &locale in locales {
        tags.insert(product::all(locale));
        tags.insert(category::all(locale));

        if let Some(id) = change.product_id.as_deref() {
            tags.insert(product::by_id(id, locale));
        }

        if let Some(slug) = change.category_slug.as_deref() {
            tags.extend(category::revalidation(slug, locale));
        }
    }

    tags
}

/// Tags to invalidate for a CMS change.
///
/// Home page edits also invalidate the listing page of every featured
/// category. Category copy invalidates its CMS tag and its listing page.
/// Unknown content types invalidate nothing.
pub fn plan_content_change(change: &ContentChange, locales: &[Locale]) -> TagSet {
    let mut tags = TagSet::new();

    for &locale in locales {
        let slugs = change.slugs(locale);

        match change.content_type {
            ContentType::Home => {
                tags.extend(cms::revalidation(cms::ContentKind::Home, None, locale));
                tags.extend(slugs.iter().map(|slug| category::plp(slug, locale)));
            }
            ContentType::Category => {
                for slug in slugs {
                    tags.extend(cms::revalidation(
                        cms::ContentKind::Category,
                        Some(slug),
                        locale,
                    ));
                    tags.insert(category::plp(slug, locale));
                }
            }
            ContentType::Other(_) => {}
        }
    }

    tags
}
