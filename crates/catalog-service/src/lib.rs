//! # catalog-service
//!
//! Business logic for the product catalog. The filter compiler turns
//! caller supplied filter parameters into a [`Selector`]; the product
//! service authorizes callers and hands the filters to an injected
//! [`ProductQuery`] capability.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.
//!
//! [`Selector`]: catalog_core::types::Selector

pub mod context;
pub mod permission;
pub mod product;
pub mod startup;

pub use context::RequestContext;
pub use permission::{PermissionValidator, RbacPermissionValidator};
pub use product::{
    FilterCompiler, FilterSet, InMemoryProductStore, ProductCursor, ProductFilterInput,
    ProductQuery, ProductQueryArgs, ProductService, ProductsQueryArgs,
};
