//! Core type definitions used across the catalog workspace.

pub mod filter;
pub mod selector;

pub use filter::{Condition, FilterValue, Pattern};
pub use selector::Selector;
