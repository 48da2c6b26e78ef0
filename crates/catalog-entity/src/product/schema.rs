//! Product schema: field declarations that can be extended at startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_core::error::AppError;

use super::model::Product;

/// Value shape of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A string.
    String,
    /// A number.
    Number,
    /// A boolean.
    Boolean,
    /// An array of strings.
    StringArray,
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// Declaration of one product field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Value shape.
    pub kind: FieldKind,
    /// Whether the field may be absent or null.
    #[serde(default)]
    pub optional: bool,
    /// Allowed values for string fields or string array elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl FieldSpec {
    /// A required field of the given kind.
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
            allowed_values: None,
        }
    }

    /// An optional field of the given kind.
    pub fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: true,
            allowed_values: None,
        }
    }

    /// Restrict string values to the given set.
    pub fn with_allowed_values(mut self, values: Vec<String>) -> Self {
        self.allowed_values = Some(values);
        self
    }

    fn check(&self, name: &str, value: Option<&Value>) -> Result<(), AppError> {
        let value = match value {
            None | Some(Value::Null) if self.optional => return Ok(()),
            None | Some(Value::Null) => {
                return Err(AppError::validation(format!("'{name}' is required")));
            }
            Some(value) => value,
        };

        if !self.kind.accepts(value) {
            return Err(AppError::validation(format!(
                "'{name}' must be of type {:?}",
                self.kind
            )));
        }

        if let Some(allowed) = &self.allowed_values {
            let candidates: Vec<&str> = match value {
                Value::String(s) => vec![s.as_str()],
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                _ => Vec::new(),
            };
            if let Some(bad) = candidates
                .into_iter()
                .find(|c| !allowed.iter().any(|a| a == c))
            {
                return Err(AppError::validation(format!(
                    "'{bad}' is not an allowed value for '{name}'"
                )));
            }
        }

        Ok(())
    }
}

/// The set of declared product fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSchema {
    fields: BTreeMap<String, FieldSpec>,
}

impl ProductSchema {
    /// The base product schema.
    pub fn new() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("_id".to_string(), FieldSpec::required(FieldKind::String));
        fields.insert("shopId".to_string(), FieldSpec::required(FieldKind::String));
        fields.insert("title".to_string(), FieldSpec::optional(FieldKind::String));
        fields.insert("pageTitle".to_string(), FieldSpec::optional(FieldKind::String));
        fields.insert("description".to_string(), FieldSpec::optional(FieldKind::String));
        fields.insert("ancestors".to_string(), FieldSpec::required(FieldKind::StringArray));
        fields.insert("hashtags".to_string(), FieldSpec::optional(FieldKind::StringArray));
        fields.insert("isDeleted".to_string(), FieldSpec::required(FieldKind::Boolean));
        fields.insert("isVisible".to_string(), FieldSpec::required(FieldKind::Boolean));
        Self { fields }
    }

    /// Add or replace field declarations.
    pub fn extend(&mut self, extension: impl IntoIterator<Item = (String, FieldSpec)>) {
        for (name, spec) in extension {
            tracing::debug!(field = %name, "Extending product schema");
            self.fields.insert(name, spec);
        }
    }

    /// Declaration for a field, if any.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Validate a product against every declared field.
    pub fn validate_product(&self, product: &Product) -> Result<(), AppError> {
        let document = product.to_document();
        for (name, spec) in &self.fields {
            spec.check(name, document.get(name))?;
        }
        Ok(())
    }
}

impl Default for ProductSchema {
    fn default() -> Self {
        Self::new()
    }
}
