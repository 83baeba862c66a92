//! Category Models

use serde::{Deserialize, Serialize};

use crate::localized::LocalizedString;

/// Category, as held by the commerce platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id.
    pub id: String,

    /// Name.
    #[serde(default)]
    pub name: LocalizedString,

    /// Slug.
    #[serde(default)]
    pub slug: LocalizedString,

    /// Parent category id.
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Sort hint within the parent.
    #[serde(default)]
    pub order_hint: Option<String>,
}
