//! # catalog-core
//!
//! Core crate for the product catalog. Contains configuration schemas,
//! the selector types produced by the filter compiler (and their
//! evaluation against JSON documents), and the unified error system.
//!
//! This crate has **no** internal dependencies on other catalog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
