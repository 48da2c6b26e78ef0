//! Startup hooks for the products module.

use async_trait::async_trait;
use tracing::{info, warn};

use catalog_core::config::catalog::FulfillmentConfig;
use catalog_core::result::AppResult;
use catalog_entity::product::{FieldKind, FieldSpec, ProductSchema};

/// Product field holding the fulfillment types a product supports.
pub const SUPPORTED_FULFILLMENT_TYPES_FIELD: &str = "supportedFulfillmentTypes";

/// Used when neither the source nor the configuration provides a type.
const FALLBACK_FULFILLMENT_TYPE: &str = "shipping";

/// Source of the fulfillment types registered on this instance.
#[async_trait]
pub trait FulfillmentTypeSource: Send + Sync {
    /// All registered fulfillment types.
    async fn all_fulfillment_types(&self) -> AppResult<Vec<String>>;
}

/// A fixed list of fulfillment types.
#[derive(Debug, Clone, Default)]
pub struct StaticFulfillmentTypes {
    types: Vec<String>,
}

impl StaticFulfillmentTypes {
    /// Creates a source returning `types`.
    pub fn new(types: Vec<String>) -> Self {
        Self { types }
    }
}

#[async_trait]
impl FulfillmentTypeSource for StaticFulfillmentTypes {
    async fn all_fulfillment_types(&self) -> AppResult<Vec<String>> {
        Ok(self.types.clone())
    }
}

/// Extends `schema` with `supportedFulfillmentTypes`, restricted to the
/// registered fulfillment types.
///
/// An empty registry falls back to `defaults` with a warning.
pub async fn extend_schemas(
    source: &dyn FulfillmentTypeSource,
    schema: &mut ProductSchema,
    defaults: &[String],
) -> AppResult<()> {
    let mut types = source.all_fulfillment_types().await?;

    if types.is_empty() {
        types = if defaults.is_empty() {
            vec![FALLBACK_FULFILLMENT_TYPE.to_string()]
        } else {
            defaults.to_vec()
        };
        warn!(
            defaults = ?types,
            "No fulfillment types available, using defaults"
        );
    }

    schema.extend([(
        SUPPORTED_FULFILLMENT_TYPES_FIELD.to_string(),
        FieldSpec::required(FieldKind::StringArray).with_allowed_values(types),
    )]);

    Ok(())
}

/// Runs the products startup hooks and returns the extended schema.
pub async fn product_startup(
    source: &dyn FulfillmentTypeSource,
    config: &FulfillmentConfig,
) -> AppResult<ProductSchema> {
    let mut schema = ProductSchema::new();
    extend_schemas(source, &mut schema, &config.default_types).await?;
    info!("Product schema extended");
    Ok(schema)
}
