//! Price selection
//!
//! A variant carries many prices scoped by country, customer group and
//! channel. Selection picks the single price that applies to a request.

use serde::{Deserialize, Serialize};

use crate::{locale::Locale, prices::ScopedPrice};

/// Request-scoped pricing inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceContext {
    /// ISO 4217 currency code prices must be in.
    pub currency: String,

    /// Country of the shopper.
    #[serde(default)]
    pub country: Option<String>,

    /// Customer group of the shopper.
    #[serde(default)]
    pub customer_group_id: Option<String>,

    /// Distribution channel of the storefront.
    #[serde(default)]
    pub channel_id: Option<String>,
}

impl PriceContext {
    /// Context for a currency with no further scoping.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Self::default()
        }
    }

    /// Default context for a locale: its currency and country.
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            currency: locale.currency_code().to_string(),
            country: Some(locale.country().code().to_string()),
            ..Self::default()
        }
    }

    /// Set the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the customer group.
    #[must_use]
    pub fn with_customer_group(mut self, group: impl Into<String>) -> Self {
        self.customer_group_id = Some(group.into());
        self
    }

    /// Set the channel.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel_id = Some(channel.into());
        self
    }
}

/// Specificity score of a price: +4 country, +2 customer group, +1 channel.
pub fn specificity(price: &ScopedPrice) -> u8 {
    let mut score = 0;

    if price.country.is_some() {
        score += 4;
    }

    if price.customer_group.is_some() {
        score += 2;
    }

    if price.channel.is_some() {
        score += 1;
    }

    score
}

/// A scope dimension matches when the price is unscoped on it, or scoped to
/// exactly the requested value.
fn scope_matches(scope: Option<&String>, requested: Option<&String>) -> bool {
    match scope {
        None => true,
        Some(scope) => requested.is_some_and(|requested| requested == scope),
    }
}

fn matches(price: &ScopedPrice, ctx: &PriceContext) -> bool {
    scope_matches(price.country.as_ref(), ctx.country.as_ref())
        && scope_matches(price.customer_group.as_ref(), ctx.customer_group_id.as_ref())
        && scope_matches(price.channel.as_ref(), ctx.channel_id.as_ref())
}

/// Select the price that applies to `ctx`.
///
/// Prices in other currencies are ignored; `None` means the variant is
/// unpriced in the requested currency. Remaining candidates are ranked by
/// [`specificity`] (ties keep list order) and the first whose scopes all match
/// the context wins. When none matches, the highest ranked candidate is
/// returned.
pub fn select_price<'a>(prices: &'a [ScopedPrice], ctx: &PriceContext) -> Option<&'a ScopedPrice> {
    let mut candidates: Vec<&ScopedPrice> = prices
        .iter()
        .filter(|price| price.currency_code() == ctx.currency)
        .collect();

    candidates.sort_by_key(|price| std::cmp::Reverse(specificity(price)));

    candidates
        .iter()
        .copied()
        .find(|price| matches(price, ctx))
        .or_else(|| candidates.first().copied())
}
