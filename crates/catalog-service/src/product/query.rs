//! The "products" query capability consumed by the product service.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use catalog_core::result::AppResult;
use catalog_entity::product::Product;

use super::filter::ProductFilterInput;
use crate::context::RequestContext;

/// Lazy sequence of products returned by a query.
pub type ProductCursor = BoxStream<'static, AppResult<Product>>;

/// Connection (paging) arguments passed through to the store untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionArgs {
    /// Maximum number of products to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<usize>,
    /// Number of matching products to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// Arguments handed to a [`ProductQuery`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQueryArgs {
    /// Filter parameters, compiled by the store.
    pub filters: ProductFilterInput,
    /// Paging arguments.
    #[serde(default)]
    pub connection: ConnectionArgs,
}

/// A product store that can list products matching filter parameters.
#[async_trait]
pub trait ProductQuery: Send + Sync + 'static {
    /// Returns a cursor over the products admitted by `args.filters`.
    async fn products(
        &self,
        ctx: &RequestContext,
        args: ProductQueryArgs,
    ) -> AppResult<ProductCursor>;
}
