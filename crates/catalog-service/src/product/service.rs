//! Product listing resolver.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_auth::rbac::policies::PRODUCTS_RESOURCE;
use catalog_core::result::AppResult;

use super::filter::{FilterSet, ProductFilterInput};
use super::query::{ConnectionArgs, ProductCursor, ProductQuery, ProductQueryArgs};
use crate::context::RequestContext;
use crate::permission::PermissionValidator;

/// Arguments of the `products` query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQueryArgs {
    /// Shops to list products from, unless `filters.shopIds` replaces them.
    pub shop_ids: Vec<String>,
    /// Additional filter parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSet>,
    /// Visibility filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Paging arguments, passed through.
    #[serde(flatten)]
    pub connection: ConnectionArgs,
}

/// Lists products on behalf of an authorized caller.
#[derive(Clone)]
pub struct ProductService {
    /// Permission capability.
    permissions: Arc<dyn PermissionValidator>,
    /// Products query capability.
    query: Arc<dyn ProductQuery>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(permissions: Arc<dyn PermissionValidator>, query: Arc<dyn ProductQuery>) -> Self {
        Self { permissions, query }
    }

    /// Lists products in the given shops.
    ///
    /// The permission check runs first, scoped to the shops the query will
    /// actually read: a nested `filters.shopIds` replaces `shopIds`, so it is
    /// the one checked when present. On rejection the query capability is
    /// never called. The cursor is returned as produced by the store.
    pub async fn list_products(
        &self,
        ctx: &RequestContext,
        args: ProductsQueryArgs,
    ) -> AppResult<ProductCursor> {
        let query_args = ProductQueryArgs {
            filters: ProductFilterInput {
                params: FilterSet {
                    shop_ids: Some(args.shop_ids),
                    is_visible: args.is_visible,
                    ..Default::default()
                },
                filters: args.filters,
            },
            connection: args.connection,
        };
        let shop_ids = query_args.filters.merged().shop_ids.unwrap_or_default();

        self.permissions
            .validate_permissions(ctx, PRODUCTS_RESOURCE, "read", &shop_ids)
            .await?;

        info!(
            request_id = %ctx.request_id,
            account_id = ?ctx.account_id,
            shops = shop_ids.len(),
            "Listing products"
        );

        self.query.products(ctx, query_args).await
    }
}
