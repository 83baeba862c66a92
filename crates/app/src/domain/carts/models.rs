//! Cart Models

use serde::Deserialize;
use vitrine::models::CartAction;

use crate::domain::carts::errors::ValidationError;

/// Quantity used when an add request does not name one.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// Request to add a product (variant) to a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    #[serde(default)]
    pub product_id: Option<String>,

    #[serde(default)]
    pub variant_id: Option<u64>,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub quantity: Option<i64>,
}

impl LineItemDraft {
    #[must_use]
    pub fn product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sku(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant_id: u64) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Validate the draft and turn it into an update action.
    ///
    /// # Errors
    ///
    /// Fails when neither a product id nor a SKU is given, or when the
    /// quantity is below one.
    pub fn into_action(self) -> Result<CartAction, ValidationError> {
        let product_id = self.product_id.filter(|id| !id.is_empty());
        let sku = self.sku.filter(|sku| !sku.is_empty());

        if product_id.is_none() && sku.is_none() {
            return Err(ValidationError::MissingProductReference);
        }

        let quantity = positive_quantity(self.quantity.unwrap_or(DEFAULT_ADD_QUANTITY), 1)?;

        Ok(CartAction::AddLineItem {
            product_id,
            variant_id: self.variant_id.filter(|id| *id > 0),
            sku,
            quantity,
        })
    }
}

/// Check `quantity >= minimum` and narrow it.
///
/// # Errors
///
/// Fails when the quantity is below `minimum` or does not fit a `u32`.
pub fn positive_quantity(quantity: i64, minimum: i64) -> Result<u32, ValidationError> {
    if quantity < minimum {
        return Err(ValidationError::InvalidQuantity { quantity, minimum });
    }

    u32::try_from(quantity)
        .map_err(|_overflow| ValidationError::InvalidQuantity { quantity, minimum })
}
