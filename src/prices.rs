//! Prices

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor units, as held by the commerce platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    /// ISO 4217 currency code.
    pub currency_code: String,

    /// Amount in pence/cents.
    pub cent_amount: i64,
}

impl Amount {
    /// Creates a new amount.
    pub fn new(currency_code: impl Into<String>, cent_amount: i64) -> Self {
        Self {
            currency_code: currency_code.into(),
            cent_amount,
        }
    }

    /// Formats the amount as `"12.99 EUR"`.
    pub fn format(&self) -> String {
        format_cent_amount(self.cent_amount, &self.currency_code)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Formats a minor-unit amount with two decimal places followed by the
/// currency code.
pub fn format_cent_amount(cent_amount: i64, currency_code: &str) -> String {
    let amount = Decimal::new(cent_amount, 2);

    format!("{amount:.2} {currency_code}")
}

/// A price of a product variant, optionally scoped to a country, customer
/// group or channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedPrice {
    /// Base value.
    pub value: Amount,

    /// Discounted value, when a product discount applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted: Option<Amount>,

    /// Country scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Customer group scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_group: Option<String>,

    /// Distribution channel scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ScopedPrice {
    /// An unscoped price.
    pub fn new(value: Amount) -> Self {
        Self {
            value,
            discounted: None,
            country: None,
            customer_group: None,
            channel: None,
        }
    }

    /// Scope the price to a country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Scope the price to a customer group.
    #[must_use]
    pub fn with_customer_group(mut self, group: impl Into<String>) -> Self {
        self.customer_group = Some(group.into());
        self
    }

    /// Scope the price to a channel.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Attach a discounted value.
    #[must_use]
    pub fn with_discounted(mut self, discounted: Amount) -> Self {
        self.discounted = Some(discounted);
        self
    }

    /// Currency of the base value.
    pub fn currency_code(&self) -> &str {
        &self.value.currency_code
    }
}

/// Projected price for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    /// ISO 4217 currency code.
    pub currency_code: String,

    /// Base amount in minor units.
    pub cent_amount: i64,

    /// Whether a discounted value exists.
    pub discounted: bool,

    /// Discounted amount in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_cent_amount: Option<i64>,
}

impl From<&ScopedPrice> for PriceView {
    fn from(price: &ScopedPrice) -> Self {
        Self {
            currency_code: price.value.currency_code.clone(),
            cent_amount: price.value.cent_amount,
            discounted: price.discounted.is_some(),
            discounted_cent_amount: price.discounted.as_ref().map(|d| d.cent_amount),
        }
    }
}

impl PriceView {
    /// The amount a customer pays: the discounted amount when it undercuts the
    /// base amount, otherwise the base amount.
    pub fn effective_cent_amount(&self) -> i64 {
        match self.discounted_cent_amount {
            Some(discounted) if self.discounted && discounted < self.cent_amount => discounted,
            _ => self.cent_amount,
        }
    }
}
