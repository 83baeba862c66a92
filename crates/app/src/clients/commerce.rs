//! Commerce platform client contract.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use vitrine::{
    locale::Locale,
    models::{Cart, CartAction, Category, Product, ProductPage},
};

/// Errors reported by the commerce platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The submitted version is stale (HTTP 409).
    #[error("version conflict")]
    Conflict,

    /// The resource does not exist (HTTP 404).
    #[error("resource not found")]
    NotFound,

    /// Transport failure, timeout or 5xx response.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl PlatformError {
    /// Map an HTTP status of a failed platform response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Upstream(message.into()),
        }
    }
}

/// Cart creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDraft {
    /// ISO 4217 currency code.
    pub currency: String,

    /// ISO 3166 country code.
    pub country: Option<String>,

    /// Locale tag.
    pub locale: Option<String>,
}

impl CartDraft {
    /// Draft for a storefront locale: its currency, country and tag.
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            currency: locale.currency_code().to_string(),
            country: Some(locale.country().code().to_string()),
            locale: Some(locale.as_str().to_string()),
        }
    }
}

/// Product listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Locale used for sorting by name.
    pub locale: Locale,

    /// Page size.
    pub limit: u32,

    /// Page offset.
    pub offset: u32,
}

#[automock]
#[async_trait]
pub trait CommercePlatform: Send + Sync {
    /// Fetch a cart by id.
    async fn get_cart(&self, id: &str) -> Result<Cart, PlatformError>;

    /// Create an anonymous cart.
    async fn create_cart(&self, draft: CartDraft) -> Result<Cart, PlatformError>;

    /// Apply update actions to a cart at `version`.
    ///
    /// Fails with [`PlatformError::Conflict`] when `version` is not the
    /// cart's current version.
    async fn update_cart(
        &self,
        id: &str,
        version: u64,
        actions: Vec<CartAction>,
    ) -> Result<Cart, PlatformError>;

    /// List products sorted by name in the query locale.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, PlatformError>;

    /// Fetch a product by id.
    async fn get_product(&self, id: &str) -> Result<Product, PlatformError>;

    /// Find a product by its slug in `locale`.
    async fn find_product_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Product>, PlatformError>;

    /// Find a category by its slug in `locale`, or in the default locale.
    async fn get_category_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Category>, PlatformError>;

    /// List categories ordered by their order hint.
    async fn list_categories(&self, limit: u32) -> Result<Vec<Category>, PlatformError>;

    /// List the products of a category.
    async fn list_products_by_category(
        &self,
        category_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ProductPage, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_error_kinds() {
        assert_eq!(PlatformError::from_status(409, "stale"), PlatformError::Conflict);
        assert_eq!(PlatformError::from_status(404, "gone"), PlatformError::NotFound);
        assert_eq!(
            PlatformError::from_status(503, "unavailable"),
            PlatformError::Upstream("unavailable".to_string())
        );
    }

    #[test]
    fn draft_follows_locale() {
        let draft = CartDraft::for_locale(Locale::EnGb);

        assert_eq!(draft.currency, "GBP");
        assert_eq!(draft.country.as_deref(), Some("GB"));
        assert_eq!(draft.locale.as_deref(), Some("en-GB"));
    }
}
