//! Request context

use serde::Serialize;

use crate::{
    locale::{Locale, negotiate},
    pricing::PriceContext,
};

/// Lifetime of the cart id cookie: 30 days.
pub const CART_COOKIE_MAX_AGE_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Per-request storefront context, built once at ingress and passed down by
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreContext {
    /// Active locale.
    pub locale: Locale,

    /// Pricing inputs derived from the locale.
    pub price: PriceContext,

    /// Read unpublished CMS content.
    pub preview: bool,
}

impl StoreContext {
    /// Context for a locale with its default pricing scope.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            price: PriceContext::for_locale(locale),
            preview: false,
        }
    }

    /// Resolve the locale of a request.
    ///
    /// A supported locale cookie wins, then `Accept-Language` negotiation,
    /// then `default`.
    pub fn resolve(cookie: Option<&str>, accept_language: Option<&str>, default: Locale) -> Self {
        let locale = cookie
            .and_then(|value| value.trim().parse::<Locale>().ok())
            .or_else(|| accept_language.map(|header| negotiate(header, default)))
            .unwrap_or(default);

        Self::new(locale)
    }

    /// Toggle CMS preview reads.
    #[must_use]
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Replace the pricing scope.
    #[must_use]
    pub fn with_price(mut self, price: PriceContext) -> Self {
        self.price = price;
        self
    }

    /// Name of the cookie holding the cart id for this locale.
    pub fn cart_cookie_name(&self) -> String {
        cart_cookie_name(self.locale)
    }
}

/// Name of the cookie holding the cart id for `locale`.
pub fn cart_cookie_name(locale: Locale) -> String {
    format!("cartId:{locale}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_wins_over_header() {
        let ctx = StoreContext::resolve(Some("en-GB"), Some("de-DE,de;q=0.9"), Locale::DeDe);

        assert_eq!(ctx.locale, Locale::EnGb);
        assert_eq!(ctx.price.currency, "GBP");
        assert_eq!(ctx.price.country.as_deref(), Some("GB"));
    }

    #[test]
    fn invalid_cookie_falls_back_to_negotiation() {
        let ctx = StoreContext::resolve(Some("fr-FR"), Some("en;q=0.8, de;q=0.9"), Locale::EnGb);

        assert_eq!(ctx.locale, Locale::DeDe);
    }

    #[test]
    fn nothing_yields_default() {
        assert_eq!(StoreContext::resolve(None, None, Locale::EnGb).locale, Locale::EnGb);
        assert_eq!(StoreContext::resolve(None, Some("*"), Locale::DeDe).locale, Locale::DeDe);
    }

    #[test]
    fn cart_cookie_is_per_locale() {
        assert_eq!(StoreContext::new(Locale::DeDe).cart_cookie_name(), "cartId:de-DE");
        assert_eq!(cart_cookie_name(Locale::EnGb), "cartId:en-GB");
    }
}
