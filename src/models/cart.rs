//! Cart Models

use serde::{Deserialize, Serialize};

use crate::{
    localized::LocalizedString,
    models::product::ProductVariant,
    prices::Amount,
};

/// Cart, as held by the commerce platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Stable cart id.
    pub id: String,

    /// Version assigned by the platform; every update must quote it.
    pub version: u64,

    /// Cart currency.
    pub currency: String,

    /// Cart country.
    #[serde(default)]
    pub country: Option<String>,

    /// Cart locale.
    #[serde(default)]
    pub locale: Option<String>,

    /// Line items in cart order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,

    /// Net total, when taxes have been calculated.
    #[serde(default)]
    pub total_net: Option<Amount>,

    /// Gross total.
    #[serde(default)]
    pub total_price: Option<Amount>,
}

impl Cart {
    /// Find a line item.
    pub fn line_item(&self, id: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    /// Sum of line item quantities.
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }
}

/// Unit price of a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPrice {
    /// Base value.
    #[serde(default)]
    pub value: Option<Amount>,

    /// Discounted value.
    #[serde(default)]
    pub discounted: Option<Amount>,
}

/// Line item of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line item id.
    pub id: String,

    /// Product id.
    pub product_id: String,

    /// Product name.
    #[serde(default)]
    pub name: LocalizedString,

    /// Variant snapshot.
    #[serde(default)]
    pub variant: Option<ProductVariant>,

    /// Quantity; zero never appears, the line is removed instead.
    pub quantity: u32,

    /// Unit price.
    #[serde(default)]
    pub price: Option<LineItemPrice>,

    /// Line total.
    #[serde(default)]
    pub total_price: Option<Amount>,
}

/// Update action submitted together with a cart version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CartAction {
    /// Add a product (variant) to the cart.
    #[serde(rename_all = "camelCase")]
    AddLineItem {
        /// Product id.
        #[serde(skip_serializing_if = "Option::is_none")]
        product_id: Option<String>,

        /// Variant id.
        #[serde(skip_serializing_if = "Option::is_none")]
        variant_id: Option<u64>,

        /// Variant SKU.
        #[serde(skip_serializing_if = "Option::is_none")]
        sku: Option<String>,

        /// Quantity to add.
        quantity: u32,
    },

    /// Set the quantity of an existing line.
    #[serde(rename_all = "camelCase")]
    ChangeLineItemQuantity {
        /// Line item id.
        line_item_id: String,

        /// New quantity.
        quantity: u32,
    },

    /// Remove a line.
    #[serde(rename_all = "camelCase")]
    RemoveLineItem {
        /// Line item id.
        line_item_id: String,
    },

    /// Recalculate prices and totals.
    #[serde(rename_all = "camelCase")]
    Recalculate {
        /// Refresh product data (names, images) as well.
        update_product_data: bool,
    },
}
