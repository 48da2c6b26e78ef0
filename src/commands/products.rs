//! Product listing CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use futures::TryStreamExt;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use catalog_auth::rbac::RbacEnforcer;
use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_entity::account::AccountRole;
use catalog_entity::product::Product;
use catalog_service::product::ConnectionArgs;
use catalog_service::startup::{StaticFulfillmentTypes, product_startup};
use catalog_service::{
    FilterCompiler, FilterSet, InMemoryProductStore, ProductService, ProductsQueryArgs,
    RbacPermissionValidator, RequestContext,
};

/// Arguments for product commands
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Product subcommand
    #[command(subcommand)]
    pub command: ProductsCommand,
}

/// Product subcommands
#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products from a JSON catalog file
    List(ListArgs),
}

/// Arguments for `products list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// JSON file containing an array of products
    #[arg(long)]
    pub catalog: PathBuf,

    /// Shop to list products from (repeatable)
    #[arg(long = "shop", required = true)]
    pub shops: Vec<String>,

    /// Role of the calling account
    #[arg(long, default_value = "admin")]
    pub role: String,

    /// Calling account identifier
    #[arg(long)]
    pub account: Option<String>,

    /// Shop the calling account belongs to (repeatable)
    #[arg(long = "member-shop")]
    pub member_shops: Vec<String>,

    /// Filter parameters as JSON
    #[arg(long)]
    pub filters: Option<String>,

    /// Only visible (true) or hidden (false) products
    #[arg(long)]
    pub visible: Option<bool>,

    /// Registered fulfillment type (repeatable)
    #[arg(long = "fulfillment-type")]
    pub fulfillment_types: Vec<String>,

    /// Maximum number of products
    #[arg(long)]
    pub first: Option<usize>,

    /// Number of products to skip
    #[arg(long)]
    pub offset: Option<usize>,
}

/// Product table row
#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    /// Product ID
    id: String,
    /// Shop ID
    shop: String,
    /// Title
    title: String,
    /// Visible
    visible: bool,
    /// Price range
    price: String,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            shop: product.shop_id,
            title: product.title.unwrap_or_default(),
            visible: product.is_visible,
            price: product
                .price
                .map(|p| format!("{:.2} - {:.2}", p.min, p.max))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute product commands
pub async fn execute(
    args: &ProductsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ProductsCommand::List(list) => list_products(list, config, format).await,
    }
}

async fn list_products(
    args: &ListArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let raw = tokio::fs::read_to_string(&args.catalog).await?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;

    let source = StaticFulfillmentTypes::new(args.fulfillment_types.clone());
    let schema = product_startup(&source, &config.catalog.fulfillment).await?;

    let store = InMemoryProductStore::new(FilterCompiler::new(config.catalog.filters.clone()), schema);
    store.insert_all(products).await?;

    let service = ProductService::new(
        Arc::new(RbacPermissionValidator::new(Arc::new(RbacEnforcer::new()))),
        Arc::new(store),
    );

    let filters: Option<FilterSet> = args
        .filters
        .as_deref()
        .map(|raw| serde_json::from_str::<FilterSet>(raw))
        .transpose()
        .map_err(|e| AppError::validation(format!("Invalid filter parameters: {e}")))?;

    let role: AccountRole = args.role.parse()?;
    let ctx = RequestContext::new(args.account.clone(), role, args.member_shops.clone());

    let query = ProductsQueryArgs {
        shop_ids: args.shops.clone(),
        filters,
        is_visible: args.visible,
        connection: ConnectionArgs {
            first: args.first,
            offset: args.offset,
        },
    };

    let rows: Vec<ProductRow> = service
        .list_products(&ctx, query)
        .await?
        .map_ok(ProductRow::from)
        .try_collect()
        .await?;

    output::print_list(&rows, format);
    Ok(())
}
