//! # catalog-auth
//!
//! Authorization for the product catalog.
//!
//! ## Modules
//!
//! - `rbac`: role-to-permission policies and their enforcement

pub mod rbac;

pub use rbac::{CatalogPermission, RbacEnforcer, RbacPolicies};
