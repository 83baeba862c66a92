//! Category projection

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    context::StoreContext, dto::content::CategoryContentDto, locale::Locale, models::Category,
};

/// Locale tried when the request locale has no name or slug.
const FALLBACK_LOCALE: &str = "en-GB";

/// Name shown for a category without any usable name.
const MISSING_NAME: &str = "—";

/// Projected category tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Category id.
    pub id: String,

    /// Localized name.
    pub name: String,

    /// Localized slug.
    pub slug: String,

    /// Parent category id.
    pub parent_id: Option<String>,

    /// Child categories, sorted by name.
    pub children: Vec<CategoryDto>,

    /// CMS copy, when enriched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<CategoryContentDto>,
}

impl CategoryDto {
    /// Project a single category without children.
    pub fn project(category: &Category, locale: Locale) -> Self {
        Self {
            id: category.id.clone(),
            name: category
                .name
                .get(locale.as_str())
                .or_else(|| category.name.get(FALLBACK_LOCALE))
                .unwrap_or(MISSING_NAME)
                .to_string(),
            slug: category
                .slug
                .get(locale.as_str())
                .or_else(|| category.slug.get(FALLBACK_LOCALE))
                .unwrap_or(&category.id)
                .to_string(),
            parent_id: category.parent_id.clone(),
            children: Vec::new(),
            content: None,
        }
    }

    /// Attach CMS copy.
    #[must_use]
    pub fn with_content(mut self, content: CategoryContentDto) -> Self {
        self.content = Some(content);
        self
    }
}

fn sort_by_name(nodes: &mut [CategoryDto]) {
    nodes.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    for node in nodes {
        sort_by_name(&mut node.children);
    }
}

fn attach(
    id: &str,
    nodes: &mut FxHashMap<String, CategoryDto>,
    children: &FxHashMap<&str, Vec<&str>>,
) -> Option<CategoryDto> {
    let mut node = nodes.remove(id)?;

    if let Some(child_ids) = children.get(id) {
        node.children = child_ids
            .iter()
            .filter_map(|child| attach(child, nodes, children))
            .collect();
    }

    Some(node)
}

/// Build the category tree of a flat category list.
///
/// Categories whose parent is absent from the list become roots. Siblings are
/// sorted by name at every level.
pub fn build_category_tree(categories: &[Category], ctx: &StoreContext) -> Vec<CategoryDto> {
    let known: FxHashMap<&str, &Category> = categories
        .iter()
        .map(|category| (category.id.as_str(), category))
        .collect();

    let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    let mut roots = Vec::new();

    for category in categories {
        match category.parent_id.as_deref() {
            Some(parent) if parent != category.id && known.contains_key(parent) => {
                children.entry(parent).or_default().push(category.id.as_str());
            }
            _ => roots.push(category.id.as_str()),
        }
    }

    let mut nodes: FxHashMap<String, CategoryDto> = categories
        .iter()
        .map(|category| (category.id.clone(), CategoryDto::project(category, ctx.locale)))
        .collect();

    let mut tree: Vec<CategoryDto> = roots
        .into_iter()
        .filter_map(|id| attach(id, &mut nodes, &children))
        .collect();

    sort_by_name(&mut tree);

    tree
}

/// Flatten a tree depth first, parents before their children.
pub fn flatten(tree: &[CategoryDto]) -> Vec<&CategoryDto> {
    let mut out = Vec::new();

    for node in tree {
        out.push(node);
        out.extend(flatten(&node.children));
    }

    out
}

/// Categories to showcase: the featured slugs when any are given, otherwise
/// the first `limit` categories of the flattened tree (at least one).
pub fn showcase(tree: &[CategoryDto], featured: &[String], limit: usize) -> Vec<CategoryDto> {
    let flat = flatten(tree);

    let chosen: Vec<&CategoryDto> = if featured.is_empty() {
        flat.into_iter().take(limit.max(1)).collect()
    } else {
        flat.into_iter()
            .filter(|category| featured.contains(&category.slug))
            .collect()
    };

    chosen
        .into_iter()
        .map(|category| CategoryDto {
            children: Vec::new(),
            ..category.clone()
        })
        .collect()
}
