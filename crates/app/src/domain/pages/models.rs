//! Page aggregates.

use serde::Serialize;
use vitrine::dto::{CategoryContentDto, CategoryDto, HomeDto, Page, PlpDto, ProductSummaryDto};

/// Everything the home page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageDto {
    pub home: HomeDto,

    /// Showcased categories with their copy, when published.
    pub showcase: Vec<CategoryDto>,

    pub recommended: Page<ProductSummaryDto>,
}

/// Category listing page with its editorial copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageDto {
    pub listing: PlpDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<CategoryContentDto>,
}
