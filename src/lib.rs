//! Vitrine
//!
//! Vitrine is the storefront core: locale negotiation, scoped price selection, localized attribute
//! resolution, cache tag planning and response projection for a headless commerce storefront.

pub mod attributes;
pub mod context;
pub mod dto;
pub mod locale;
pub mod localized;
pub mod models;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod revalidation;
pub mod tags;
