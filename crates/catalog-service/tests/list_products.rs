//! Integration tests for the products resolver.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::TryStreamExt;

use catalog_auth::rbac::RbacEnforcer;
use catalog_core::config::catalog::FilterConfig;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_entity::account::AccountRole;
use catalog_entity::product::{Metafield, PriceRange, Product, ProductSchema};
use catalog_service::product::ConnectionArgs;
use catalog_service::{
    FilterCompiler, FilterSet, InMemoryProductStore, PermissionValidator, ProductCursor,
    ProductQuery, ProductQueryArgs, ProductService, ProductsQueryArgs, RbacPermissionValidator,
    RequestContext,
};

/// Permission capability returning a fixed answer and recording its calls.
#[derive(Default)]
struct FixedPermissions {
    deny: bool,
    calls: Mutex<Vec<(String, String, Vec<String>)>>,
}

#[async_trait]
impl PermissionValidator for FixedPermissions {
    async fn validate_permissions(
        &self,
        _ctx: &RequestContext,
        resource: &str,
        action: &str,
        shop_ids: &[String],
    ) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((resource.to_string(), action.to_string(), shop_ids.to_vec()));
        if self.deny {
            Err(AppError::authorization("denied"))
        } else {
            Ok(())
        }
    }
}

/// Query capability recording the arguments it receives.
#[derive(Default)]
struct RecordingQuery {
    calls: Mutex<Vec<ProductQueryArgs>>,
}

#[async_trait]
impl ProductQuery for RecordingQuery {
    async fn products(
        &self,
        _ctx: &RequestContext,
        args: ProductQueryArgs,
    ) -> AppResult<ProductCursor> {
        self.calls.lock().unwrap().push(args);
        Ok(Box::pin(futures::stream::empty()))
    }
}

fn shops(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_rejected_permission_never_queries() {
    let permissions = Arc::new(FixedPermissions {
        deny: true,
        ..Default::default()
    });
    let query = Arc::new(RecordingQuery::default());
    let service = ProductService::new(permissions.clone(), query.clone());

    let err = service
        .list_products(
            &RequestContext::anonymous(),
            ProductsQueryArgs {
                shop_ids: shops(&["SHOP_ID"]),
                ..Default::default()
            },
        )
        .await
        .err()
        .unwrap();

    assert!(err.is_authorization());
    assert_eq!(permissions.calls.lock().unwrap().len(), 1);
    assert!(query.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_arguments_are_forwarded() {
    let permissions = Arc::new(FixedPermissions::default());
    let query = Arc::new(RecordingQuery::default());
    let service = ProductService::new(permissions.clone(), query.clone());

    let args: ProductsQueryArgs = serde_json::from_value(serde_json::json!({
        "shopIds": ["SHOP_ID"],
        "filters": {"isArchived": true},
        "isVisible": true,
        "first": 20,
    }))
    .unwrap();

    let cursor = service
        .list_products(&RequestContext::admin("acct-admin"), args)
        .await
        .unwrap();
    let products: Vec<Product> = cursor.try_collect().await.unwrap();
    assert!(products.is_empty());

    let checks = permissions.calls.lock().unwrap();
    assert_eq!(
        checks[0],
        ("catalog:products".to_string(), "read".to_string(), shops(&["SHOP_ID"]))
    );

    let calls = query.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let merged = calls[0].filters.merged();
    assert_eq!(merged.shop_ids, Some(shops(&["SHOP_ID"])));
    assert_eq!(merged.is_visible, Some(true));
    assert_eq!(merged.is_archived, Some(true));
    assert_eq!(
        calls[0].connection,
        ConnectionArgs {
            first: Some(20),
            offset: None
        }
    );
}

fn catalog() -> Vec<Product> {
    let mut red_shirt = Product::new("P1", "S1");
    red_shirt.title = Some("Red shirt".into());
    red_shirt.hashtags = vec!["T1".into()];
    red_shirt.metafields = vec![Metafield::new("color", "Red")];
    red_shirt.price = Some(PriceRange {
        min: 150.0,
        max: 900.0,
    });

    let mut blue_shirt = Product::new("P2", "S1");
    blue_shirt.title = Some("Blue shirt".into());
    blue_shirt.description = Some("Not red at all".into());
    blue_shirt.metafields = vec![Metafield::new("color", "blue")];
    blue_shirt.price = Some(PriceRange {
        min: 20.0,
        max: 40.0,
    });

    let mut hidden = Product::new("P3", "S2");
    hidden.page_title = Some("RED hat".into());
    hidden.is_visible = false;

    let mut archived = Product::new("P4", "S2");
    archived.title = Some("Red scarf".into());
    archived.is_deleted = true;

    vec![red_shirt, blue_shirt, hidden, archived]
}

async fn live_service() -> ProductService {
    let store = InMemoryProductStore::new(
        FilterCompiler::new(FilterConfig::default()),
        ProductSchema::new(),
    );
    store.insert_all(catalog()).await.unwrap();

    ProductService::new(
        Arc::new(RbacPermissionValidator::new(Arc::new(RbacEnforcer::new()))),
        Arc::new(store),
    )
}

async fn listed(service: &ProductService, ctx: &RequestContext, args: ProductsQueryArgs) -> Vec<String> {
    service
        .list_products(ctx, args)
        .await
        .unwrap()
        .map_ok(|p| p.id)
        .try_collect()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_manager_lists_matching_products() {
    let service = live_service().await;
    let ctx = RequestContext::new(Some("acct-1".into()), AccountRole::Manager, shops(&["S1", "S2"]));

    let all = listed(
        &service,
        &ctx,
        ProductsQueryArgs {
            shop_ids: shops(&["S1", "S2"]),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(all, vec!["P1", "P2", "P3"]);

    let red_visible = listed(
        &service,
        &ctx,
        ProductsQueryArgs {
            shop_ids: shops(&["S1", "S2"]),
            is_visible: Some(true),
            filters: Some(FilterSet {
                query: Some("red".into()),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(red_visible, vec!["P1", "P2"]);

    let exact_red = listed(
        &service,
        &ctx,
        ProductsQueryArgs {
            shop_ids: shops(&["S1"]),
            filters: Some(FilterSet {
                metafield_key: Some("color".into()),
                metafield_value: Some("red".into()),
                is_exact_match: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await;
    assert!(exact_red.is_empty());

    let priced = listed(
        &service,
        &ctx,
        ProductsQueryArgs {
            shop_ids: shops(&["S1"]),
            filters: Some(FilterSet {
                price_min: Some(100.0),
                price_max: Some(1000.0),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(priced, vec!["P1"]);
}

#[tokio::test]
async fn test_archived_products_on_request() {
    let service = live_service().await;
    let ctx = RequestContext::admin("acct-admin");

    let archived = listed(
        &service,
        &ctx,
        ProductsQueryArgs {
            shop_ids: shops(&["S2"]),
            filters: Some(FilterSet {
                is_archived: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(archived, vec!["P4"]);
}

#[tokio::test]
async fn test_foreign_shop_rejected() {
    let service = live_service().await;
    let ctx = RequestContext::new(Some("acct-1".into()), AccountRole::Manager, shops(&["S1"]));

    let err = service
        .list_products(
            &ctx,
            ProductsQueryArgs {
                shop_ids: shops(&["S2"]),
                ..Default::default()
            },
        )
        .await
        .err()
        .unwrap();
    assert!(err.is_authorization());
}

#[tokio::test]
async fn test_nested_shops_are_the_checked_scope() {
    let permissions = Arc::new(FixedPermissions::default());
    let query = Arc::new(RecordingQuery::default());
    let service = ProductService::new(permissions.clone(), query.clone());

    service
        .list_products(
            &RequestContext::admin("acct-admin"),
            ProductsQueryArgs {
                shop_ids: shops(&["S1"]),
                filters: Some(FilterSet {
                    shop_ids: Some(shops(&["S2"])),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let checks = permissions.calls.lock().unwrap();
    assert_eq!(checks[0].2, shops(&["S2"]));

    let calls = query.calls.lock().unwrap();
    assert_eq!(calls[0].filters.params.shop_ids, Some(shops(&["S1"])));
    assert_eq!(
        calls[0].filters.filters.as_ref().and_then(|f| f.shop_ids.clone()),
        Some(shops(&["S2"]))
    );
}

#[tokio::test]
async fn test_nested_foreign_shop_rejected() {
    let service = live_service().await;
    let ctx = RequestContext::new(Some("acct-1".into()), AccountRole::Manager, shops(&["S1"]));

    let err = service
        .list_products(
            &ctx,
            ProductsQueryArgs {
                shop_ids: shops(&["S1"]),
                filters: Some(FilterSet {
                    shop_ids: Some(shops(&["S2"])),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .err()
        .unwrap();
    assert!(err.is_authorization());

    let own = listed(
        &service,
        &ctx,
        ProductsQueryArgs {
            shop_ids: shops(&["S2"]),
            filters: Some(FilterSet {
                shop_ids: Some(shops(&["S1"])),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(own, vec!["P1", "P2"]);
}
