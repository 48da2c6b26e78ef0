//! Product listing: filter compilation, the query capability, and the resolver.

pub mod filter;
pub mod query;
pub mod service;
pub mod store;

pub use filter::{FilterCompiler, FilterSet, ProductFilterInput};
pub use query::{ConnectionArgs, ProductCursor, ProductQuery, ProductQueryArgs};
pub use service::{ProductService, ProductsQueryArgs};
pub use store::InMemoryProductStore;
