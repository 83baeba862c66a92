//! Storefront application services: platform collaborators, cart mutation,
//! cached reads and cache revalidation.

pub mod cache;
pub mod clients;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
