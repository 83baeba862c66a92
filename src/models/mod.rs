//! Platform Models
//!
//! The shapes this storefront reads from the commerce and content platforms.
//! They are owned by the systems of record and only ever read here.

pub mod cart;
pub mod category;
pub mod content;
pub mod product;

pub use cart::{Cart, CartAction, LineItem, LineItemPrice};
pub use category::Category;
pub use content::{CategoryContent, HomeContent};
pub use product::{Image, Product, ProductPage, ProductVariant, RawAttribute};
