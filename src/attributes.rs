//! Attribute values
//!
//! Platform attributes arrive as arbitrary JSON: plain scalars, localized
//! strings, enums with plain or localized labels, money, or arrays of any of
//! these. [`AttributeValue::classify`] decides the shape once at ingestion and
//! [`AttributeValue::resolve`] turns it into a single display value for a
//! locale. Both are total.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::{localized::LocalizedString, prices::Amount};

/// Share of keys that must look like locale tags for an object to be treated
/// as a localized string.
const LOCALE_KEY_RATIO: f64 = 0.6;

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text
    Text(String),

    /// Number
    Number(Number),

    /// Boolean
    Bool(bool),
}

/// Label of an enum attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumLabel {
    /// Plain label.
    Plain(String),

    /// Label per locale.
    Localized(LocalizedString),
}

/// A classified attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// JSON `null`.
    Empty,

    /// Plain scalar.
    Scalar(Scalar),

    /// Localized string.
    LocalizedString(LocalizedString),

    /// Enum or localized enum.
    Enum {
        /// Enum key.
        key: String,

        /// Enum label.
        label: EnumLabel,
    },

    /// Money.
    Money(Amount),

    /// Set of values.
    List(Vec<AttributeValue>),

    /// Anything else, kept verbatim.
    Other(Value),
}

/// A resolved, display-ready attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// No value.
    Empty,

    /// Text
    Text(String),

    /// Number
    Number(Number),

    /// Boolean
    Bool(bool),

    /// Homogeneous list of texts.
    Texts(Vec<String>),

    /// Homogeneous list of numbers.
    Numbers(Vec<Number>),
}

impl Resolved {
    /// Render as a single line; lists are joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            Resolved::Empty => String::new(),
            Resolved::Text(text) => text.clone(),
            Resolved::Number(number) => number.to_string(),
            Resolved::Bool(value) => value.to_string(),
            Resolved::Texts(texts) => texts.join(", "),
            Resolved::Numbers(numbers) => numbers
                .iter()
                .map(Number::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Whether `key` looks like `xx` or `xx-YY`.
fn looks_like_locale_key(key: &str) -> bool {
    let bytes = key.as_bytes();

    match bytes {
        [a, b] => a.is_ascii_lowercase() && b.is_ascii_lowercase(),
        [a, b, b'-', c, d] => {
            a.is_ascii_lowercase()
                && b.is_ascii_lowercase()
                && c.is_ascii_uppercase()
                && d.is_ascii_uppercase()
        }
        _ => false,
    }
}

fn is_localized_object(object: &Map<String, Value>) -> bool {
    if object.is_empty() {
        return false;
    }

    let localeish = object.keys().filter(|key| looks_like_locale_key(key)).count();

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "object sizes are far below f64 precision and the floor is non-negative"
    )]
    let threshold = ((object.len() as f64) * LOCALE_KEY_RATIO).floor() as usize;

    localeish >= threshold.max(1)
}

fn classify_enum(object: &Map<String, Value>) -> Option<AttributeValue> {
    let key = object.get("key")?.as_str()?;
    let label = object.get("label")?;

    let label = match label {
        Value::String(text) => EnumLabel::Plain(text.clone()),
        Value::Object(localized) => EnumLabel::Localized(LocalizedString::from_json_object(localized)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => {
            EnumLabel::Plain(label.to_string())
        }
    };

    Some(AttributeValue::Enum {
        key: key.to_string(),
        label,
    })
}

fn classify_money(object: &Map<String, Value>) -> Option<AttributeValue> {
    let cent_amount = object.get("centAmount")?.as_i64()?;
    let currency_code = object.get("currencyCode")?.as_str()?;

    Some(AttributeValue::Money(Amount::new(currency_code, cent_amount)))
}

impl AttributeValue {
    /// Classify a raw platform value. First match wins: localized string,
    /// enum, list, money, scalar, anything else.
    pub fn classify(raw: &Value) -> Self {
        match raw {
            Value::Null => AttributeValue::Empty,
            Value::String(text) => AttributeValue::Scalar(Scalar::Text(text.clone())),
            Value::Number(number) => AttributeValue::Scalar(Scalar::Number(number.clone())),
            Value::Bool(value) => AttributeValue::Scalar(Scalar::Bool(*value)),
            Value::Array(values) => {
                AttributeValue::List(values.iter().map(Self::classify_element).collect())
            }
            Value::Object(object) => {
                if is_localized_object(object) {
                    return AttributeValue::LocalizedString(LocalizedString::from_json_object(
                        object,
                    ));
                }

                classify_enum(object)
                    .or_else(|| classify_money(object))
                    .unwrap_or_else(|| AttributeValue::Other(raw.clone()))
            }
        }
    }

    /// Elements of a set never nest further; inner arrays are kept verbatim.
    fn classify_element(raw: &Value) -> Self {
        match raw {
            Value::Array(_) => AttributeValue::Other(raw.clone()),
            Value::Null | Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Object(_) => {
                Self::classify(raw)
            }
        }
    }

    /// Resolve to a display value for `locale`, trying `fallbacks` in order
    /// when the locale is missing.
    pub fn resolve(&self, locale: &str, fallbacks: &[&str]) -> Resolved {
        match self {
            AttributeValue::List(values) => homogenize(
                values
                    .iter()
                    .map(|value| match value {
                        AttributeValue::Empty => Resolved::Text(String::new()),
                        other => other.resolve(locale, fallbacks),
                    })
                    .collect(),
            ),
            AttributeValue::Empty => Resolved::Empty,
            AttributeValue::Scalar(Scalar::Text(text)) => Resolved::Text(text.clone()),
            AttributeValue::Scalar(Scalar::Number(number)) => Resolved::Number(number.clone()),
            AttributeValue::Scalar(Scalar::Bool(value)) => Resolved::Bool(*value),
            AttributeValue::LocalizedString(localized) => Resolved::Text(
                localized
                    .pick(locale, fallbacks)
                    .unwrap_or_default()
                    .to_string(),
            ),
            AttributeValue::Enum { key, label } => Resolved::Text(match label {
                EnumLabel::Plain(text) if text.is_empty() => key.clone(),
                EnumLabel::Plain(text) => text.clone(),
                EnumLabel::Localized(localized) => localized
                    .pick(locale, fallbacks)
                    .map_or_else(|| key.clone(), ToString::to_string),
            }),
            AttributeValue::Money(amount) => Resolved::Text(amount.format()),
            AttributeValue::Other(raw) => Resolved::Text(raw.to_string()),
        }
    }
}

/// Collapse resolved list elements into texts or numbers. Mixed lists are
/// stringified element by element.
fn homogenize(values: Vec<Resolved>) -> Resolved {
    if values.iter().all(|value| matches!(value, Resolved::Text(_))) {
        return Resolved::Texts(values.iter().map(Resolved::display).collect());
    }

    if values.iter().all(|value| matches!(value, Resolved::Number(_))) {
        return Resolved::Numbers(
            values
                .into_iter()
                .filter_map(|value| match value {
                    Resolved::Number(number) => Some(number),
                    _ => None,
                })
                .collect(),
        );
    }

    Resolved::Texts(values.iter().map(Resolved::display).collect())
}

/// Classify and resolve a raw value in one step.
pub fn resolve(locale: &str, raw: &Value, fallbacks: &[&str]) -> Resolved {
    AttributeValue::classify(raw).resolve(locale, fallbacks)
}
