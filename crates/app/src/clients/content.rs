//! Content platform client contract.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use vitrine::{
    locale::Locale,
    models::{CategoryContent, HomeContent},
};

/// Errors reported by the content platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Transport failure, timeout or error response.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

#[automock]
#[async_trait]
pub trait ContentPlatform: Send + Sync {
    /// Fetch the home page entry. `preview` reads unpublished drafts.
    async fn get_home_content(
        &self,
        locale: Locale,
        preview: bool,
    ) -> Result<Option<HomeContent>, ContentError>;

    /// Fetch the copy of a category.
    async fn get_category_content(
        &self,
        slug: &str,
        locale: Locale,
        preview: bool,
    ) -> Result<Option<CategoryContent>, ContentError>;
}
