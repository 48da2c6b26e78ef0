//! Product domain entities.

pub mod model;
pub mod schema;

pub use model::{Metafield, PriceRange, Product};
pub use schema::{FieldKind, FieldSpec, ProductSchema};
