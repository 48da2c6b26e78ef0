//! Product catalog settings: filter compilation and fulfillment defaults.

use serde::{Deserialize, Serialize};

/// Catalog configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Filter compiler settings.
    #[serde(default)]
    pub filters: FilterConfig,
    /// Fulfillment type settings used by the schema startup hook.
    #[serde(default)]
    pub fulfillment: FulfillmentConfig,
}

/// How a price bound of exactly zero is treated.
///
/// Historically a `0` bound was indistinguishable from an unset one, so
/// `priceMin: 0` never produced a price clause. `Ignore` keeps that
/// behavior; `Apply` treats zero as a real bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPriceBound {
    /// A zero bound is dropped.
    #[default]
    Ignore,
    /// A zero bound is applied like any other value.
    Apply,
}

/// Filter compiler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Zero price bound policy.
    #[serde(default)]
    pub zero_price_bound: ZeroPriceBound,
}

/// Fulfillment type configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentConfig {
    /// Types used when no fulfillment type is registered.
    #[serde(default = "default_fulfillment_types")]
    pub default_types: Vec<String>,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            default_types: default_fulfillment_types(),
        }
    }
}

fn default_fulfillment_types() -> Vec<String> {
    vec!["shipping".to_string()]
}
