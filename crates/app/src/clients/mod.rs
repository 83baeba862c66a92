//! Platform collaborators
//!
//! The commerce platform is the system of record for products, categories and
//! carts; the content platform holds editorial copy. Both are consumed through
//! these traits so services can be exercised against mocks and fakes.

pub mod commerce;
pub mod content;

pub use commerce::{CartDraft, CommercePlatform, MockCommercePlatform, PlatformError, ProductQuery};
pub use content::{ContentError, ContentPlatform, MockContentPlatform};
