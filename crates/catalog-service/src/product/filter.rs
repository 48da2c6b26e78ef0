//! Product filter parameters and their compilation into a [`Selector`].
//!
//! Callers send a flat set of filter parameters, optionally repeated under
//! a nested `filters` object. The nested copy takes precedence field by
//! field. Every parameter that is set adds one clause to the selector;
//! unset parameters add nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use validator::{Validate, ValidationError};

use catalog_core::config::catalog::{FilterConfig, ZeroPriceBound};
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::{Condition, FilterValue, Selector};

use crate::context::RequestContext;

/// Fields searched by the free-text `query` parameter.
const QUERY_FIELDS: [&str; 3] = ["title", "pageTitle", "description"];

/// One set of product filter parameters.
///
/// Unknown keys and wrongly typed values are rejected on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_price_bounds"))]
pub struct FilterSet {
    /// Restrict to these product identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<String>>,
    /// Restrict to products owned by these shops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_ids: Option<Vec<String>>,
    /// Restrict to products carrying any of these tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
    /// Case-insensitive match against title, page title, or description.
    ///
    /// Interpreted as a `regex` crate pattern, so lookaround and
    /// backreferences (`a(?=b)`, `(a)\1`) fail validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Match the soft-delete flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// Match the visibility flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Metafield key to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metafield_key: Option<String>,
    /// Metafield value to match; a pattern like `query` unless exact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metafield_value: Option<String>,
    /// Exact metafield matching instead of case-insensitive substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_exact_match: Option<bool>,
    /// Lower bound on `price.min`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    /// Upper bound on `price.max`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
}

impl FilterSet {
    /// Apply `nested` on top of `self`: every field set in `nested` wins.
    pub fn overlay(&self, nested: &FilterSet) -> FilterSet {
        FilterSet {
            product_ids: nested.product_ids.clone().or_else(|| self.product_ids.clone()),
            shop_ids: nested.shop_ids.clone().or_else(|| self.shop_ids.clone()),
            tag_ids: nested.tag_ids.clone().or_else(|| self.tag_ids.clone()),
            query: nested.query.clone().or_else(|| self.query.clone()),
            is_archived: nested.is_archived.or(self.is_archived),
            is_visible: nested.is_visible.or(self.is_visible),
            metafield_key: nested.metafield_key.clone().or_else(|| self.metafield_key.clone()),
            metafield_value: nested
                .metafield_value
                .clone()
                .or_else(|| self.metafield_value.clone()),
            is_exact_match: nested.is_exact_match.or(self.is_exact_match),
            price_min: nested.price_min.or(self.price_min),
            price_max: nested.price_max.or(self.price_max),
        }
    }
}

fn validate_price_bounds(set: &FilterSet) -> Result<(), ValidationError> {
    for (name, bound) in [("priceMin", set.price_min), ("priceMax", set.price_max)] {
        if bound.is_some_and(|v| !v.is_finite()) {
            return Err(ValidationError::new("price_not_finite")
                .with_message(format!("{name} must be a finite number").into()));
        }
    }
    Ok(())
}

/// Filter parameters as received: a top-level set plus an optional nested one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "Map<String, Value>")]
pub struct ProductFilterInput {
    /// Top-level parameters.
    #[serde(flatten)]
    #[validate(nested)]
    pub params: FilterSet,
    /// Nested parameters; override top-level ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub filters: Option<FilterSet>,
}

impl ProductFilterInput {
    /// Input with only top-level parameters.
    pub fn from_params(params: FilterSet) -> Self {
        Self {
            params,
            filters: None,
        }
    }

    /// The effective parameters after applying the nested override.
    pub fn merged(&self) -> FilterSet {
        match &self.filters {
            Some(nested) => self.params.overlay(nested),
            None => self.params.clone(),
        }
    }
}

impl TryFrom<Map<String, Value>> for ProductFilterInput {
    type Error = serde_json::Error;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let filters = match map.remove("filters") {
            None | Some(Value::Null) => None,
            Some(nested) => Some(serde_json::from_value(nested)?),
        };
        let params = serde_json::from_value(Value::Object(map))?;
        Ok(Self { params, filters })
    }
}

/// Compiles product filter parameters into a selector.
///
/// Construct once from configuration and share; compilation is pure.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    config: FilterConfig,
}

impl FilterCompiler {
    /// Creates a compiler with the given settings.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Deserializes raw JSON parameters and compiles them.
    pub fn compile_value(&self, ctx: &RequestContext, value: Value) -> AppResult<Selector> {
        let input: ProductFilterInput = serde_json::from_value(value)
            .map_err(|e| AppError::validation(format!("Invalid filter parameters: {e}")))?;
        self.compile(ctx, &input)
    }

    /// Builds the selector for the given parameters.
    ///
    /// Fails with a validation error before any clause is built when the
    /// parameters are malformed.
    pub fn compile(&self, ctx: &RequestContext, input: &ProductFilterInput) -> AppResult<Selector> {
        input.validate()?;
        let params = input.merged();
        let exact_metafields = params.is_exact_match.unwrap_or(false);

        let query = match params.query.as_deref().filter(|q| !q.is_empty()) {
            Some(q) => Some(ilike("query", q)?),
            None => None,
        };
        let metafield = match (params.metafield_key.as_deref(), params.metafield_value.as_deref())
        {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                Some(if exact_metafields {
                    Selector::new()
                        .with("key", Condition::eq(key))
                        .with("value", Condition::eq(value))
                } else {
                    Selector::new()
                        .with("key", ilike("metafieldKey", key)?)
                        .with("value", ilike("metafieldValue", value)?)
                })
            }
            _ => None,
        };

        let mut selector = base_selector();

        if let Some(ids) = &params.product_ids {
            selector.set("_id", Condition::In(ids.clone()));
        }
        if let Some(ids) = &params.shop_ids {
            selector.set("shopId", Condition::In(ids.clone()));
        }
        if let Some(ids) = &params.tag_ids {
            selector.set("hashtags", Condition::In(ids.clone()));
        }

        if let Some(condition) = query {
            selector.set_any_of(
                QUERY_FIELDS
                    .iter()
                    .map(|field| Selector::new().with(*field, condition.clone()))
                    .collect(),
            );
        }

        if let Some(element) = metafield {
            selector.set("metafields", Condition::ElemMatch(element));
        }

        if let Some(visible) = params.is_visible {
            selector.set("isVisible", Condition::eq(visible));
        }
        // Archived products are the soft-deleted ones
        if let Some(archived) = params.is_archived {
            selector.set("isDeleted", Condition::eq(archived));
        }

        if let Some(min) = self.price_bound("priceMin", params.price_min) {
            selector.set("price.min", Condition::Gte(min));
        }
        if let Some(max) = self.price_bound("priceMax", params.price_max) {
            selector.set("price.max", Condition::Lte(max));
        }

        debug!(
            request_id = %ctx.request_id,
            clauses = selector.len(),
            "Compiled product selector"
        );

        Ok(selector)
    }

    fn price_bound(&self, name: &str, bound: Option<f64>) -> Option<f64> {
        match bound {
            Some(value) if value == 0.0 && self.config.zero_price_bound == ZeroPriceBound::Ignore => {
                debug!(bound = name, "Zero price bound treated as unset");
                None
            }
            other => other,
        }
    }
}

/// The unconditional constraints: top-level products that are not deleted.
pub fn base_selector() -> Selector {
    Selector::new()
        .with("ancestors", Condition::Eq(FilterValue::StringList(Vec::new())))
        .with("isDeleted", Condition::Ne(FilterValue::Boolean(true)))
}

fn ilike(name: &str, pattern: &str) -> AppResult<Condition> {
    Condition::ilike(pattern)
        .map_err(|e| AppError::validation(format!("{name} is not a valid pattern: {e}")))
}
