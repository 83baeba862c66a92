//! Storefront Domain Concerns

pub mod carts;
pub mod catalog;
pub mod content;
pub mod pages;
pub mod revalidation;
