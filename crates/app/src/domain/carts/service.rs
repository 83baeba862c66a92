//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use vitrine::{
    context::StoreContext,
    models::{Cart, CartAction},
};

use crate::{
    clients::{CartDraft, CommercePlatform, PlatformError},
    domain::carts::{
        errors::{CartsServiceError, ValidationError},
        models::{LineItemDraft, positive_quantity},
        retry::{RetryPolicy, update_with_retry},
    },
};

#[derive(Clone)]
pub struct PlatformCartsService {
    platform: Arc<dyn CommercePlatform>,
    retry: RetryPolicy,
}

impl PlatformCartsService {
    #[must_use]
    pub fn new(platform: Arc<dyn CommercePlatform>, retry: RetryPolicy) -> Self {
        Self { platform, retry }
    }

    async fn update(
        &self,
        cart_id: &str,
        version: u64,
        actions: &[CartAction],
    ) -> Result<Cart, CartsServiceError> {
        let cart =
            update_with_retry(self.platform.as_ref(), self.retry, cart_id, version, actions)
                .await?;

        Ok(cart)
    }
}

fn require_line_item(line_item_id: &str) -> Result<(), ValidationError> {
    if line_item_id.trim().is_empty() {
        return Err(ValidationError::MissingLineItem);
    }

    Ok(())
}

#[async_trait]
impl CartsService for PlatformCartsService {
    #[tracing::instrument(name = "carts.service.get_cart", skip(self), err)]
    async fn get_cart(&self, cart_id: &str) -> Result<Cart, CartsServiceError> {
        Ok(self.platform.get_cart(cart_id).await?)
    }

    #[tracing::instrument(
        name = "carts.service.ensure_cart",
        skip(self, ctx, cart_id),
        fields(
            locale = %ctx.locale,
            cart_id = tracing::field::Empty,
            created = tracing::field::Empty
        ),
        err
    )]
    async fn ensure_cart(
        &self,
        ctx: &StoreContext,
        cart_id: Option<String>,
    ) -> Result<Cart, CartsServiceError> {
        let span = tracing::Span::current();

        let existing = match cart_id.as_deref() {
            Some(id) => match self.platform.get_cart(id).await {
                Ok(cart) if cart.currency == ctx.price.currency => Some(cart),
                Ok(cart) => {
                    tracing::debug!(
                        cart_id = %cart.id,
                        cart_currency = %cart.currency,
                        wanted = %ctx.price.currency,
                        "cart currency does not match locale, starting a new cart"
                    );
                    None
                }
                Err(PlatformError::NotFound) => None,
                Err(error) => return Err(error.into()),
            },
            None => None,
        };

        let (cart, created) = match existing {
            Some(cart) => (cart, false),
            None => {
                let draft = CartDraft {
                    currency: ctx.price.currency.clone(),
                    country: ctx.price.country.clone(),
                    locale: Some(ctx.locale.as_str().to_string()),
                };

                (self.platform.create_cart(draft).await?, true)
            }
        };

        span.record("cart_id", tracing::field::display(&cart.id));
        span.record("created", created);

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.refresh_cart",
        skip(self, cart),
        fields(cart_id = %cart.id, version = cart.version)
    )]
    async fn refresh_cart(&self, cart: Cart) -> Cart {
        let actions = vec![CartAction::Recalculate {
            update_product_data: true,
        }];

        match self
            .platform
            .update_cart(&cart.id, cart.version, actions)
            .await
        {
            Ok(refreshed) => refreshed,
            Err(error) => {
                tracing::warn!(%error, "cart recalculation failed, serving unrefreshed cart");
                cart
            }
        }
    }

    #[tracing::instrument(name = "carts.service.add_line", skip(self, draft), err)]
    async fn add_line(
        &self,
        cart_id: &str,
        version: u64,
        draft: LineItemDraft,
    ) -> Result<Cart, CartsServiceError> {
        let action = draft.into_action()?;

        self.update(cart_id, version, &[action]).await
    }

    #[tracing::instrument(name = "carts.service.change_quantity", skip(self), err)]
    async fn change_quantity(
        &self,
        cart_id: &str,
        version: u64,
        line_item_id: &str,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        require_line_item(line_item_id)?;

        let quantity = positive_quantity(quantity, 1)?;

        let action = CartAction::ChangeLineItemQuantity {
            line_item_id: line_item_id.to_string(),
            quantity,
        };

        self.update(cart_id, version, &[action]).await
    }

    #[tracing::instrument(name = "carts.service.remove_line", skip(self), err)]
    async fn remove_line(
        &self,
        cart_id: &str,
        version: u64,
        line_item_id: &str,
    ) -> Result<Cart, CartsServiceError> {
        require_line_item(line_item_id)?;

        let action = CartAction::RemoveLineItem {
            line_item_id: line_item_id.to_string(),
        };

        self.update(cart_id, version, &[action]).await
    }

    async fn set_quantity(
        &self,
        cart_id: &str,
        version: u64,
        line_item_id: &str,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        if positive_quantity(quantity, 0)? == 0 {
            return self.remove_line(cart_id, version, line_item_id).await;
        }

        self.change_quantity(cart_id, version, line_item_id, quantity)
            .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart.
    async fn get_cart(&self, cart_id: &str) -> Result<Cart, CartsServiceError>;

    /// Load the client's cart for the context locale, or create one.
    ///
    /// A missing cart, or one in another currency than the locale's, is
    /// replaced by a new cart.
    async fn ensure_cart(
        &self,
        ctx: &StoreContext,
        cart_id: Option<String>,
    ) -> Result<Cart, CartsServiceError>;

    /// Recalculate prices and product data; failures leave the cart as is.
    async fn refresh_cart(&self, cart: Cart) -> Cart;

    /// Add a product (variant) to the cart.
    async fn add_line(
        &self,
        cart_id: &str,
        version: u64,
        draft: LineItemDraft,
    ) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of a line; the quantity must be at least one.
    async fn change_quantity(
        &self,
        cart_id: &str,
        version: u64,
        line_item_id: &str,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line.
    async fn remove_line(
        &self,
        cart_id: &str,
        version: u64,
        line_item_id: &str,
    ) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of a line, removing it when the quantity is zero.
    async fn set_quantity(
        &self,
        cart_id: &str,
        version: u64,
        line_item_id: &str,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;
}
