//! CMS Content Models

use serde::{Deserialize, Serialize};

/// Home page entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    /// Hero headline.
    #[serde(default)]
    pub hero_title: Option<String>,

    /// Hero subtitle.
    #[serde(default)]
    pub hero_subtitle: Option<String>,

    /// Hero call to action label.
    #[serde(default)]
    pub hero_cta_text: Option<String>,

    /// Hero call to action target.
    #[serde(default)]
    pub hero_cta_link: Option<String>,

    /// Hero image URL.
    #[serde(default)]
    pub hero_image_url: Option<String>,

    /// Slugs of the categories featured on the home page.
    #[serde(default)]
    pub featured_category_slugs: Vec<String>,

    /// Heading of the recommendations strip.
    #[serde(default)]
    pub recommended_heading: Option<String>,

    /// Heading of the category showcase.
    #[serde(default)]
    pub showcase_heading: Option<String>,
}

/// Category copy entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContent {
    /// Title.
    #[serde(default)]
    pub title: Option<String>,

    /// Category slug the entry belongs to.
    #[serde(default)]
    pub slug: Option<String>,

    /// Short teaser.
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}
