//! Query selectors: a mapping of field path to [`Condition`].
//!
//! A selector is what the filter compiler produces and what a product
//! store consumes. It serializes to the familiar document-store shape
//! (`{"shopId": {"$in": [...]}, "$or": [...]}`) and can also be
//! evaluated directly against a JSON document with [`Selector::matches`].

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::filter::Condition;

/// Key under which the disjunction is serialized.
pub const OR_KEY: &str = "$or";

/// A conjunction of field conditions, with an optional disjunction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    clauses: BTreeMap<String, Condition>,
    any_of: Option<Vec<Selector>>,
}

impl Selector {
    /// Create an empty selector (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Selector::set`].
    pub fn with(mut self, path: impl Into<String>, condition: Condition) -> Self {
        self.set(path, condition);
        self
    }

    /// Set the condition for a field path, replacing any previous one.
    pub fn set(&mut self, path: impl Into<String>, condition: Condition) {
        self.clauses.insert(path.into(), condition);
    }

    /// Set the disjunction, replacing any previous one.
    pub fn set_any_of(&mut self, branches: Vec<Selector>) {
        self.any_of = Some(branches);
    }

    /// Condition for a field path, if any.
    pub fn get(&self, path: &str) -> Option<&Condition> {
        self.clauses.get(path)
    }

    /// Whether a condition exists for the field path.
    pub fn contains(&self, path: &str) -> bool {
        self.clauses.contains_key(path)
    }

    /// The disjunction branches, if any.
    pub fn any_of(&self) -> Option<&[Selector]> {
        self.any_of.as_deref()
    }

    /// Iterate over field conditions in path order.
    pub fn clauses(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.clauses.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of top-level keys, counting the disjunction as one.
    pub fn len(&self) -> usize {
        self.clauses.len() + usize::from(self.any_of.is_some())
    }

    /// Whether the selector has no constraints.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a JSON document.
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Evaluate against a JSON document.
    ///
    /// Dotted paths (`price.min`) walk nested objects.
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(path, condition)| condition.matches(lookup(document, path)))
            && self
                .any_of
                .as_ref()
                .is_none_or(|branches| branches.iter().any(|b| b.matches(document)))
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (path, condition) in &self.clauses {
            map.serialize_entry(path, condition)?;
        }
        if let Some(branches) = &self.any_of {
            map.serialize_entry(OR_KEY, branches)?;
        }
        map.end()
    }
}
