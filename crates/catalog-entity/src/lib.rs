//! # catalog-entity
//!
//! Domain entities shared across the catalog crates.

pub mod account;
pub mod product;
