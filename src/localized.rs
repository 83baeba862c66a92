//! Localized strings

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::SerializeMap,
};
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::locale::Locale;

/// Fallback order used when a caller does not supply its own.
pub const DEFAULT_FALLBACKS: [&str; 2] = ["en-GB", "de-DE"];

/// A map of locale tag to text, in the order the platform authored it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedString {
    entries: SmallVec<[(String, String); 4]>,
}

impl LocalizedString {
    /// Creates a localized string from `(locale, text)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(locale, text)| (locale.into(), text.into()))
                .collect(),
        }
    }

    /// Build from a JSON object. Scalar values are rendered as text, `null`
    /// as an empty string and nested structures as compact JSON.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self::from_pairs(object.iter().map(|(locale, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                    value.to_string()
                }
            };

            (locale.clone(), text)
        }))
    }

    /// Text for an exact locale tag.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(tag, _)| tag == locale)
            .map(|(_, text)| text.as_str())
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate `(locale, text)` pairs in authored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(tag, text)| (tag.as_str(), text.as_str()))
    }

    /// Pick text for `locale`.
    ///
    /// Empty entries are skipped for the requested locale and the fallbacks;
    /// when nothing qualifies the first authored value is returned as is.
    pub fn pick<'a>(&'a self, locale: &str, fallbacks: &[&str]) -> Option<&'a str> {
        std::iter::once(locale)
            .chain(fallbacks.iter().copied())
            .find_map(|tag| self.get(tag).filter(|text| !text.is_empty()))
            .or_else(|| self.entries.first().map(|(_, text)| text.as_str()))
    }

    /// Pick text for a storefront locale with the default fallbacks, or an
    /// empty string.
    pub fn localized(&self, locale: Locale) -> &str {
        self.pick(locale.as_str(), &DEFAULT_FALLBACKS)
            .unwrap_or_default()
    }
}

impl Serialize for LocalizedString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;

        for (locale, text) in &self.entries {
            map.serialize_entry(locale, text)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;

        Ok(Self::from_json_object(&object))
    }
}
