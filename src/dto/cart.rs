//! Cart projection

use serde::Serialize;

use crate::{
    context::StoreContext,
    dto::absolute_url,
    models::{Cart, LineItem},
    prices::{Amount, PriceView},
};

/// Projected cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItemDto {
    /// Line item id.
    pub id: String,

    /// Product id.
    pub product_id: String,

    /// Localized product name.
    pub name: String,

    /// First variant image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Variant id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<u64>,

    /// Variant SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Quantity.
    pub quantity: u32,

    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<PriceView>,

    /// Line total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_total: Option<Amount>,
}

/// Projected cart. Never cached; always derived from the latest platform
/// response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    /// Cart id.
    pub id: String,

    /// Version the client must quote on its next mutation.
    pub version: u64,

    /// Cart currency.
    pub currency: String,

    /// Cart country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Net total, or gross total before tax calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Amount>,

    /// Gross total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Amount>,

    /// Lines.
    pub line_items: Vec<CartLineItemDto>,
}

fn unit_price(item: &LineItem) -> Option<PriceView> {
    let price = item.price.as_ref()?;
    let base = price.value.as_ref().or(price.discounted.as_ref())?;

    Some(PriceView {
        currency_code: base.currency_code.clone(),
        cent_amount: base.cent_amount,
        discounted: price.discounted.is_some(),
        discounted_cent_amount: price.discounted.as_ref().map(|d| d.cent_amount),
    })
}

fn line_item(item: &LineItem, ctx: &StoreContext) -> CartLineItemDto {
    let variant = item.variant.as_ref();

    CartLineItemDto {
        id: item.id.clone(),
        product_id: item.product_id.clone(),
        name: item
            .name
            .get(ctx.locale.as_str())
            .or_else(|| item.name.iter().next().map(|(_, text)| text))
            .unwrap_or_default()
            .to_string(),
        image_url: variant
            .and_then(|v| v.images.first())
            .map(|image| absolute_url(&image.url)),
        variant_id: variant.map(|v| v.id),
        sku: variant.and_then(|v| v.sku.clone()),
        quantity: item.quantity,
        unit_price: unit_price(item),
        line_total: item.total_price.clone(),
    }
}

impl CartDto {
    /// Project a cart for the request context.
    pub fn project(cart: &Cart, ctx: &StoreContext) -> Self {
        Self {
            id: cart.id.clone(),
            version: cart.version,
            currency: cart
                .total_price
                .as_ref()
                .map_or_else(|| cart.currency.clone(), |total| total.currency_code.clone()),
            country: cart.country.clone(),
            subtotal: cart.total_net.clone().or_else(|| cart.total_price.clone()),
            total: cart.total_price.clone(),
            line_items: cart
                .line_items
                .iter()
                .map(|item| line_item(item, ctx))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        locale::Locale,
        localized::LocalizedString,
        models::{Image, LineItemPrice, ProductVariant},
    };

    use super::*;

    fn cart() -> Cart {
        Cart {
            id: "c1".to_string(),
            version: 4,
            currency: "EUR".to_string(),
            country: Some("DE".to_string()),
            locale: Some("de-DE".to_string()),
            line_items: vec![LineItem {
                id: "li-1".to_string(),
                product_id: "p1".to_string(),
                name: LocalizedString::from_pairs([("en-GB", "Boot"), ("de-DE", "Stiefel")]),
                variant: Some(ProductVariant {
                    id: 2,
                    sku: Some("BOOT-42".to_string()),
                    prices: Vec::new(),
                    images: vec![Image {
                        url: "//cdn.example/boot.jpg".to_string(),
                    }],
                    attributes: Vec::new(),
                }),
                quantity: 2,
                price: Some(LineItemPrice {
                    value: Some(Amount::new("EUR", 5000)),
                    discounted: Some(Amount::new("EUR", 4000)),
                }),
                total_price: Some(Amount::new("EUR", 8000)),
            }],
            total_net: None,
            total_price: Some(Amount::new("EUR", 8000)),
        }
    }

    #[test]
    fn projects_lines_for_locale() {
        let dto = CartDto::project(&cart(), &StoreContext::new(Locale::DeDe));

        assert_eq!(dto.version, 4);
        assert_eq!(dto.currency, "EUR");
        assert_eq!(dto.subtotal, Some(Amount::new("EUR", 8000)));

        let line = dto.line_items.first();

        assert_eq!(line.map(|l| l.name.as_str()), Some("Stiefel"));
        assert_eq!(
            line.and_then(|l| l.image_url.as_deref()),
            Some("https://cdn.example/boot.jpg")
        );
        assert_eq!(
            line.and_then(|l| l.unit_price.as_ref()).map(PriceView::effective_cent_amount),
            Some(4000)
        );
    }

    #[test]
    fn empty_cart_uses_cart_currency() {
        let mut empty = cart();
        empty.line_items.clear();
        empty.total_price = None;

        let dto = CartDto::project(&empty, &StoreContext::new(Locale::DeDe));

        assert_eq!(dto.currency, "EUR");
        assert!(dto.total.is_none());
        assert!(dto.line_items.is_empty());
    }

    #[test]
    fn empty_locale_name_is_kept_as_is() {
        let mut blank = cart();

        for line in &mut blank.line_items {
            line.name = LocalizedString::from_pairs([("en-GB", "Boot"), ("de-DE", "")]);
        }

        let dto = CartDto::project(&blank, &StoreContext::new(Locale::DeDe));

        assert_eq!(dto.line_items.first().map(|l| l.name.as_str()), Some(""));
    }

    #[test]
    fn missing_locale_name_falls_back_to_first_value() {
        let mut french = cart();

        for line in &mut french.line_items {
            line.name = LocalizedString::from_pairs([("fr", "Botte"), ("en-GB", "Boot")]);
        }

        let dto = CartDto::project(&french, &StoreContext::new(Locale::DeDe));

        assert_eq!(dto.line_items.first().map(|l| l.name.as_str()), Some("Botte"));
    }
}
