//! Product Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{localized::LocalizedString, prices::ScopedPrice};

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL; may be protocol-relative.
    pub url: String,
}

/// Raw platform attribute; the value is classified on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttribute {
    /// Attribute name.
    pub name: String,

    /// Raw attribute value.
    #[serde(default)]
    pub value: Value,
}

/// Product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant id, unique within its product.
    pub id: u64,

    /// Variant SKU.
    #[serde(default)]
    pub sku: Option<String>,

    /// Prices in platform order.
    #[serde(default)]
    pub prices: Vec<ScopedPrice>,

    /// Images.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Attributes.
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

/// Product projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    pub id: String,

    /// Product version.
    #[serde(default)]
    pub version: u64,

    /// Name.
    #[serde(default)]
    pub name: LocalizedString,

    /// Slug.
    #[serde(default)]
    pub slug: LocalizedString,

    /// HTML description.
    #[serde(default)]
    pub description: Option<LocalizedString>,

    /// Master variant.
    #[serde(default)]
    pub master_variant: Option<ProductVariant>,

    /// Additional variants.
    #[serde(default)]
    pub variants: Vec<ProductVariant>,

    /// Ids of the categories the product belongs to.
    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl Product {
    /// Master variant followed by the other variants.
    pub fn all_variants(&self) -> impl Iterator<Item = &ProductVariant> {
        self.master_variant.iter().chain(self.variants.iter())
    }
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page.
    pub results: Vec<Product>,

    /// Total number of matching products.
    pub total: Option<u64>,

    /// Page size.
    pub limit: u32,

    /// Page offset.
    pub offset: u32,
}
