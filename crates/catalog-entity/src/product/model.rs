//! Product entity model.

use serde::{Deserialize, Serialize};

/// A free-form key/value annotation attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    /// Annotation key.
    pub key: String,
    /// Annotation value.
    pub value: String,
}

impl Metafield {
    /// Create a metafield.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Price range across a product's variants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest variant price.
    pub min: f64,
    /// Highest variant price.
    pub max: f64,
}

/// A catalog product as stored in the product collection.
///
/// Field names serialize in camelCase; the identifier is `_id`. Selectors
/// are evaluated against this serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning shop.
    pub shop_id: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// SEO page title.
    #[serde(default)]
    pub page_title: Option<String>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parent identifiers; empty for top-level products.
    #[serde(default)]
    pub ancestors: Vec<String>,
    /// Tag identifiers.
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Soft-delete flag (exposed to filters as `isArchived`).
    #[serde(default)]
    pub is_deleted: bool,
    /// Whether the product is visible in the storefront.
    #[serde(default)]
    pub is_visible: bool,
    /// Key/value annotations.
    #[serde(default)]
    pub metafields: Vec<Metafield>,
    /// Variant price range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
    /// Fulfillment types the product can be delivered with.
    #[serde(default)]
    pub supported_fulfillment_types: Vec<String>,
}

impl Product {
    /// Create a visible, top-level product with only the required fields set.
    pub fn new(id: impl Into<String>, shop_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shop_id: shop_id.into(),
            title: None,
            page_title: None,
            description: None,
            ancestors: Vec::new(),
            hashtags: Vec::new(),
            is_deleted: false,
            is_visible: true,
            metafields: Vec::new(),
            price: None,
            supported_fulfillment_types: Vec::new(),
        }
    }

    /// Render as the JSON document selectors are evaluated against.
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
