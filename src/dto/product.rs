//! Product projection

use serde::Serialize;

use crate::{
    attributes::{AttributeValue, Resolved},
    context::StoreContext,
    dto::absolute_url,
    localized::DEFAULT_FALLBACKS,
    models::{Product, ProductVariant, RawAttribute},
    prices::PriceView,
    pricing::select_price,
};

/// Longest specification value shown on a product page.
pub const MAX_SPECIFICATION_LEN: usize = 200;

/// Variant id assumed when a product has no master variant.
const FALLBACK_MASTER_VARIANT_ID: u64 = 1;

/// Projected product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDto {
    /// Absolute image URL.
    pub url: String,

    /// Alternative text.
    pub alt: String,
}

/// Resolved variant attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDto {
    /// Attribute name.
    pub name: String,

    /// Display value.
    pub value: Resolved,
}

/// Name / value row of the specification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specification {
    /// Attribute name.
    pub name: String,

    /// Rendered value.
    pub value: String,
}

/// Projected variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantDto {
    /// Variant id.
    pub id: u64,

    /// Variant SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Images.
    pub images: Vec<ImageDto>,

    /// Price selected for the request context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceView>,

    /// Attributes resolved for the request locale.
    pub attributes: Vec<AttributeDto>,
}

/// Projected product detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Product id.
    pub id: String,

    /// Localized name.
    pub name: String,

    /// Localized slug.
    pub slug: String,

    /// Localized HTML description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,

    /// Master variant specification table.
    pub specifications: Vec<Specification>,

    /// Master variant followed by the other variants.
    pub variants: Vec<VariantDto>,

    /// Id of the master variant.
    pub master_variant_id: u64,
}

/// Projected product listing tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryDto {
    /// Product id.
    pub id: String,

    /// Localized name.
    pub name: String,

    /// Localized slug.
    pub slug: String,

    /// First master variant image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Master variant price for the request context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceView>,
}

fn resolve_attribute(attribute: &RawAttribute, ctx: &StoreContext) -> Resolved {
    AttributeValue::classify(&attribute.value).resolve(ctx.locale.as_str(), &DEFAULT_FALLBACKS)
}

fn image_alt(sku: Option<&str>, position: usize) -> String {
    match sku {
        Some(sku) if !sku.is_empty() => format!("Image of {sku} #{position}"),
        _ => format!("Product image #{position}"),
    }
}

fn selected_price(variant: &ProductVariant, ctx: &StoreContext) -> Option<PriceView> {
    select_price(&variant.prices, &ctx.price).map(PriceView::from)
}

impl VariantDto {
    /// Project a variant for the request context.
    pub fn project(variant: &ProductVariant, ctx: &StoreContext) -> Self {
        let sku = variant.sku.as_deref().filter(|sku| !sku.is_empty());

        Self {
            id: variant.id,
            sku: sku.map(ToString::to_string),
            images: variant
                .images
                .iter()
                .enumerate()
                .map(|(index, image)| ImageDto {
                    url: absolute_url(&image.url),
                    alt: image_alt(sku, index + 1),
                })
                .collect(),
            price: selected_price(variant, ctx),
            attributes: variant
                .attributes
                .iter()
                .map(|attribute| AttributeDto {
                    name: attribute.name.clone(),
                    value: resolve_attribute(attribute, ctx),
                })
                .collect(),
        }
    }
}

/// Specification rows of a variant; empty and overlong values are dropped.
pub fn specifications(variant: &ProductVariant, ctx: &StoreContext) -> Vec<Specification> {
    variant
        .attributes
        .iter()
        .map(|attribute| Specification {
            name: attribute.name.clone(),
            value: resolve_attribute(attribute, ctx).display(),
        })
        .filter(|spec| !spec.value.is_empty() && spec.value.chars().count() <= MAX_SPECIFICATION_LEN)
        .collect()
}

impl ProductDto {
    /// Project a product for the request context.
    pub fn project(product: &Product, ctx: &StoreContext) -> Self {
        let master = product.master_variant.as_ref();

        Self {
            id: product.id.clone(),
            name: product.name.localized(ctx.locale).to_string(),
            slug: product.slug.localized(ctx.locale).to_string(),
            description_html: product
                .description
                .as_ref()
                .map(|description| description.localized(ctx.locale).to_string()),
            specifications: master
                .map(|variant| specifications(variant, ctx))
                .unwrap_or_default(),
            variants: product
                .all_variants()
                .map(|variant| VariantDto::project(variant, ctx))
                .collect(),
            master_variant_id: master.map_or(FALLBACK_MASTER_VARIANT_ID, |variant| variant.id),
        }
    }
}

impl ProductSummaryDto {
    /// Project a listing tile for the request context.
    pub fn project(product: &Product, ctx: &StoreContext) -> Self {
        let master = product.all_variants().next();

        Self {
            id: product.id.clone(),
            name: product.name.localized(ctx.locale).to_string(),
            slug: product.slug.localized(ctx.locale).to_string(),
            image_url: master
                .and_then(|variant| variant.images.first())
                .map(|image| absolute_url(&image.url)),
            price: master.and_then(|variant| selected_price(variant, ctx)),
        }
    }
}
