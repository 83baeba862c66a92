//! Locales
//!
//! The storefront serves a closed set of locales. Each one carries a default
//! currency and country, and a client's preferred locale is negotiated from an
//! `Accept-Language` header when no explicit choice has been stored.

use std::{fmt, str::FromStr};

use rusty_money::iso::{self, Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while interpreting locale identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The identifier is not one of the supported locales.
    #[error("locale not supported: {0}")]
    Unsupported(String),
}

/// A supported storefront locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    /// German (Germany)
    #[serde(rename = "de-DE")]
    DeDe,

    /// English (United Kingdom)
    #[serde(rename = "en-GB")]
    EnGb,
}

/// A supported storefront country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// Germany
    #[serde(rename = "DE")]
    De,

    /// United Kingdom
    #[serde(rename = "GB")]
    Gb,
}

impl Country {
    /// ISO 3166-1 alpha-2 code.
    pub fn code(self) -> &'static str {
        match self {
            Country::De => "DE",
            Country::Gb => "GB",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Locale {
    /// Every supported locale, in a stable order.
    pub const ALL: [Locale; 2] = [Locale::DeDe, Locale::EnGb];

    /// BCP 47 tag for the locale, e.g. `de-DE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::DeDe => "de-DE",
            Locale::EnGb => "en-GB",
        }
    }

    /// Default currency for the locale.
    pub fn currency(self) -> &'static Currency {
        match self {
            Locale::DeDe => iso::EUR,
            Locale::EnGb => iso::GBP,
        }
    }

    /// ISO 4217 code of the default currency.
    pub fn currency_code(self) -> &'static str {
        self.currency().iso_alpha_code
    }

    /// Default country for the locale.
    pub fn country(self) -> Country {
        match self {
            Locale::DeDe => Country::De,
            Locale::EnGb => Country::Gb,
        }
    }

    /// Human readable label for locale switchers.
    pub fn label(self) -> &'static str {
        match self {
            Locale::DeDe => "Deutsch (DE)",
            Locale::EnGb => "English (UK)",
        }
    }

    /// The other supported locale.
    pub fn other(self) -> Locale {
        match self {
            Locale::DeDe => Locale::EnGb,
            Locale::EnGb => Locale::DeDe,
        }
    }

    /// Locale for a country code. Anything but `DE` maps to `en-GB`.
    pub fn from_country(code: &str) -> Locale {
        if code == "DE" {
            Locale::DeDe
        } else {
            Locale::EnGb
        }
    }

    /// Locale for a currency code. Anything but `EUR` maps to `en-GB`.
    pub fn from_currency(code: &str) -> Locale {
        if code == "EUR" {
            Locale::DeDe
        } else {
            Locale::EnGb
        }
    }

    fn from_language(language: &str) -> Option<Locale> {
        match language {
            "de" => Some(Locale::DeDe),
            "en" => Some(Locale::EnGb),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

/// A single weighted entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Normalised language tag, e.g. `de-AT` or `en`.
    pub tag: String,

    /// Quality value; `1.0` unless the entry carried a parseable `q`.
    pub quality: f32,

    /// Position of the entry within the header.
    pub position: usize,
}

/// Normalise a language tag to `lang` or `lang-REGION`.
fn normalize_tag(raw: &str) -> String {
    let mut parts = raw.trim().split('-');

    let language = parts.next().unwrap_or_default().to_ascii_lowercase();

    if language.is_empty() {
        return language;
    }

    match parts.next() {
        Some(region) if !region.is_empty() => {
            format!("{language}-{}", region.to_ascii_uppercase())
        }
        _ => language,
    }
}

/// Parse an `Accept-Language` header into preferences ordered by descending
/// quality. Entries of equal quality keep their header order.
pub fn parse_accept_language(header: &str) -> SmallVec<[LanguagePreference; 4]> {
    let mut preferences: SmallVec<[LanguagePreference; 4]> = header
        .split(',')
        .enumerate()
        .filter_map(|(position, part)| {
            let mut params = part.trim().split(';');
            let tag = normalize_tag(params.next().unwrap_or_default());

            if tag.is_empty() {
                return None;
            }

            let quality = params
                .filter_map(|param| param.split_once('='))
                .filter(|(key, _)| key.trim() == "q")
                .filter_map(|(_, value)| value.trim().parse::<f32>().ok())
                .filter(|value| !value.is_nan())
                .last()
                .unwrap_or(1.0);

            Some(LanguagePreference {
                tag,
                quality,
                position,
            })
        })
        .collect();

    preferences.sort_by(|a, b| {
        b.quality
            .total_cmp(&a.quality)
            .then(a.position.cmp(&b.position))
    });

    preferences
}

/// Pick the supported locale that best satisfies an `Accept-Language` header.
///
/// Each preference is tried in order: an exact supported tag wins, otherwise
/// its base language is mapped onto a supported locale. The wildcard header
/// and headers with no usable entry fall back to `default`.
pub fn negotiate(header: &str, default: Locale) -> Locale {
    if header.trim() == "*" {
        return default;
    }

    parse_accept_language(header)
        .iter()
        .find_map(|preference| {
            preference.tag.parse::<Locale>().ok().or_else(|| {
                let language = preference.tag.split('-').next().unwrap_or_default();

                Locale::from_language(language)
            })
        })
        .unwrap_or(default)
}
