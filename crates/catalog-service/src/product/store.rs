//! In-memory product store that evaluates compiled selectors directly.

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::RwLock;
use tracing::{debug, info};

use catalog_core::result::AppResult;
use catalog_entity::product::{Product, ProductSchema};

use super::filter::FilterCompiler;
use super::query::{ProductCursor, ProductQuery, ProductQueryArgs};
use crate::context::RequestContext;

/// A [`ProductQuery`] backed by a vector of products.
#[derive(Debug)]
pub struct InMemoryProductStore {
    /// Stored products, in insertion order.
    products: RwLock<Vec<Product>>,
    /// Compiler for incoming filters.
    compiler: FilterCompiler,
    /// Schema every inserted product must satisfy.
    schema: ProductSchema,
}

impl InMemoryProductStore {
    /// Creates an empty store.
    pub fn new(compiler: FilterCompiler, schema: ProductSchema) -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            compiler,
            schema,
        }
    }

    /// Inserts a product, replacing any product with the same identifier.
    pub async fn insert(&self, product: Product) -> AppResult<()> {
        self.schema.validate_product(&product)?;

        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
        Ok(())
    }

    /// Inserts many products, stopping at the first invalid one.
    pub async fn insert_all(&self, products: impl IntoIterator<Item = Product>) -> AppResult<usize> {
        let mut count = 0;
        for product in products {
            self.insert(product).await?;
            count += 1;
        }
        info!(count, "Loaded products into memory store");
        Ok(count)
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductQuery for InMemoryProductStore {
    async fn products(
        &self,
        ctx: &RequestContext,
        args: ProductQueryArgs,
    ) -> AppResult<ProductCursor> {
        let selector = self.compiler.compile(ctx, &args.filters)?;

        let products = self.products.read().await;
        let matched: Vec<Product> = products
            .iter()
            .filter(|p| selector.matches(&p.to_document()))
            .skip(args.connection.offset.unwrap_or(0))
            .take(args.connection.first.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        debug!(
            request_id = %ctx.request_id,
            scanned = products.len(),
            matched = matched.len(),
            "Evaluated product selector"
        );

        Ok(futures::stream::iter(matched.into_iter().map(Ok)).boxed())
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use super::*;
    use crate::product::filter::{FilterSet, ProductFilterInput};
    use crate::product::query::ConnectionArgs;

    fn product(id: &str, shop: &str) -> Product {
        Product::new(id, shop)
    }

    async fn ids(store: &InMemoryProductStore, args: ProductQueryArgs) -> Vec<String> {
        store
            .products(&RequestContext::anonymous(), args)
            .await
            .unwrap()
            .map_ok(|p| p.id)
            .try_collect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_replaces_same_id() {
        let store = InMemoryProductStore::new(FilterCompiler::default(), ProductSchema::new());
        store.insert(product("P1", "S1")).await.unwrap();
        let mut updated = product("P1", "S2");
        updated.title = Some("moved".into());
        store.insert(updated).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_base_constraints_hide_deleted_and_variants() {
        let store = InMemoryProductStore::new(FilterCompiler::default(), ProductSchema::new());
        let mut deleted = product("P2", "S1");
        deleted.is_deleted = true;
        let mut variant = product("P3", "S1");
        variant.ancestors = vec!["P1".into()];
        store
            .insert_all([product("P1", "S1"), deleted, variant])
            .await
            .unwrap();

        assert_eq!(ids(&store, ProductQueryArgs::default()).await, vec!["P1"]);

        let archived = ProductQueryArgs {
            filters: ProductFilterInput::from_params(FilterSet {
                is_archived: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(ids(&store, archived).await, vec!["P2"]);
    }

    #[tokio::test]
    async fn test_connection_args_slice_results() {
        let store = InMemoryProductStore::new(FilterCompiler::default(), ProductSchema::new());
        store
            .insert_all((1..=5).map(|i| product(&format!("P{i}"), "S1")))
            .await
            .unwrap();

        let args = ProductQueryArgs {
            connection: ConnectionArgs {
                first: Some(2),
                offset: Some(1),
            },
            ..Default::default()
        };
        assert_eq!(ids(&store, args).await, vec!["P2", "P3"]);
    }

    #[tokio::test]
    async fn test_invalid_filters_fail_before_scan() {
        let store = InMemoryProductStore::new(FilterCompiler::default(), ProductSchema::new());
        let args = ProductQueryArgs {
            filters: ProductFilterInput::from_params(FilterSet {
                query: Some("(".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = store
            .products(&RequestContext::anonymous(), args)
            .await
            .err()
            .unwrap();
        assert!(err.is_validation());
    }
}
