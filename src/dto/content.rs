//! CMS content projection

use serde::Serialize;

use crate::{
    dto::absolute_url,
    models::{CategoryContent, HomeContent},
};

const DEFAULT_HERO_TITLE: &str = "Composable Storefront on Vercel";
const DEFAULT_HERO_SUBTITLE: &str =
    "Fast, fresh, and headless—powered by Next.js, Edge, and commercetools.";
const DEFAULT_HERO_CTA_TEXT: &str = "Shop Products";
const DEFAULT_HERO_CTA_LINK: &str = "/products";
const DEFAULT_RECOMMENDED_HEADING: &str = "Recommended";
const DEFAULT_SHOWCASE_HEADING: &str = "Shop by Category";

const DEFAULT_CATEGORY_SLUG: &str = "category";
const DEFAULT_CATEGORY_EXCERPT: &str = "Exciting new products.";

/// Home page hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDto {
    /// Headline.
    pub title: String,

    /// Subtitle.
    pub subtitle: String,

    /// Call to action label.
    pub cta_text: String,

    /// Call to action target.
    pub cta_link: String,

    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Projected home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDto {
    /// Hero banner.
    pub hero: HeroDto,

    /// Slugs of the featured categories.
    pub featured_category_slugs: Vec<String>,

    /// Heading of the recommendations strip.
    pub recommended_heading: String,

    /// Heading of the category showcase.
    pub showcase_heading: String,
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

impl HomeDto {
    /// Project a home page entry, filling unset fields with defaults.
    pub fn project(content: &HomeContent) -> Self {
        Self {
            hero: HeroDto {
                title: or_default(content.hero_title.as_deref(), DEFAULT_HERO_TITLE),
                subtitle: or_default(content.hero_subtitle.as_deref(), DEFAULT_HERO_SUBTITLE),
                cta_text: or_default(content.hero_cta_text.as_deref(), DEFAULT_HERO_CTA_TEXT),
                cta_link: or_default(content.hero_cta_link.as_deref(), DEFAULT_HERO_CTA_LINK),
                image_url: content.hero_image_url.as_deref().map(absolute_url),
            },
            featured_category_slugs: content.featured_category_slugs.clone(),
            recommended_heading: or_default(
                content.recommended_heading.as_deref(),
                DEFAULT_RECOMMENDED_HEADING,
            ),
            showcase_heading: or_default(
                content.showcase_heading.as_deref(),
                DEFAULT_SHOWCASE_HEADING,
            ),
        }
    }
}

/// Projected category copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContentDto {
    /// Title; the slug when unset.
    pub title: String,

    /// Category slug.
    pub slug: String,

    /// Short teaser.
    pub excerpt: String,

    /// Long description.
    pub description: String,

    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CategoryContentDto {
    /// Project a category copy entry, filling unset fields with defaults.
    pub fn project(content: &CategoryContent) -> Self {
        let slug = content
            .slug
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY_SLUG.to_string());

        Self {
            title: content.title.clone().unwrap_or_else(|| slug.clone()),
            excerpt: content
                .excerpt
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY_EXCERPT.to_string()),
            description: content.description.clone().unwrap_or_default(),
            image_url: content.image_url.as_deref().map(absolute_url),
            slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_home_entry_uses_defaults() {
        let dto = HomeDto::project(&HomeContent::default());

        assert_eq!(dto.hero.title, "Composable Storefront on Vercel");
        assert_eq!(dto.hero.cta_link, "/products");
        assert_eq!(dto.recommended_heading, "Recommended");
        assert_eq!(dto.showcase_heading, "Shop by Category");
        assert!(dto.featured_category_slugs.is_empty());
        assert!(dto.hero.image_url.is_none());
    }

    #[test]
    fn home_entry_fields_win() {
        let dto = HomeDto::project(&HomeContent {
            hero_title: Some("Autumn".to_string()),
            hero_image_url: Some("//images.example/hero.jpg".to_string()),
            featured_category_slugs: vec!["shoes".to_string()],
            ..HomeContent::default()
        });

        assert_eq!(dto.hero.title, "Autumn");
        assert_eq!(dto.hero.subtitle, DEFAULT_HERO_SUBTITLE);
        assert_eq!(dto.hero.image_url.as_deref(), Some("https://images.example/hero.jpg"));
        assert_eq!(dto.featured_category_slugs, ["shoes"]);
    }

    #[test]
    fn category_copy_defaults() {
        let dto = CategoryContentDto::project(&CategoryContent::default());

        assert_eq!(dto.slug, "category");
        assert_eq!(dto.title, "category");
        assert_eq!(dto.excerpt, "Exciting new products.");
        assert_eq!(dto.description, "");
    }
}
