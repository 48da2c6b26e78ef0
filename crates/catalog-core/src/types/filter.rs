//! Condition types for selector building.

use regex::{Regex, RegexBuilder};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::selector::Selector;

/// A literal value compared against a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Boolean(bool),
    /// A list of string values.
    StringList(Vec<String>),
}

impl FilterValue {
    /// Convert into the equivalent JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A regular expression compiled once when the condition is built.
///
/// Uses the `regex` crate syntax: lookaround and backreferences are not
/// supported.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    case_insensitive: bool,
    compiled: Regex,
}

impl Pattern {
    /// Compile `source`, optionally ignoring case.
    pub fn new(source: impl Into<String>, case_insensitive: bool) -> Result<Self, regex::Error> {
        let source = source.into();
        let compiled = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self {
            source,
            case_insensitive,
            compiled,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the `i` option is set.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Unanchored match against `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.case_insensitive == other.case_insensitive
    }
}

/// A condition on a single field path.
///
/// Serializes to the document-store operator form, e.g. `{"$in": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact equality (serialized as the bare value).
    Eq(FilterValue),
    /// Not equal; also matches a missing field.
    Ne(FilterValue),
    /// Membership in a list of strings.
    In(Vec<String>),
    /// Greater than or equal.
    Gte(f64),
    /// Less than or equal.
    Lte(f64),
    /// Regular expression match.
    Regex(Pattern),
    /// At least one element of an array field matches every clause.
    ElemMatch(Selector),
}

impl Condition {
    /// Shorthand for an equality condition.
    pub fn eq(value: impl Into<FilterValue>) -> Self {
        Self::Eq(value.into())
    }

    /// Shorthand for a case-insensitive substring (regex) match.
    pub fn ilike(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        Pattern::new(pattern, true).map(Self::Regex)
    }

    /// Evaluate the condition against a field value (`None` = missing).
    pub fn matches(&self, field: Option<&Value>) -> bool {
        match self {
            Self::Eq(expected) => equals(field, &expected.to_json()),
            Self::Ne(expected) => !equals(field, &expected.to_json()),
            Self::In(values) => match field {
                Some(Value::String(s)) => values.contains(s),
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|item| values.iter().any(|v| v == item)),
                _ => false,
            },
            Self::Gte(bound) => field.and_then(Value::as_f64).is_some_and(|n| n >= *bound),
            Self::Lte(bound) => field.and_then(Value::as_f64).is_some_and(|n| n <= *bound),
            Self::Regex(pattern) => match field {
                Some(Value::String(s)) => pattern.is_match(s),
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|s| pattern.is_match(s)),
                _ => false,
            },
            Self::ElemMatch(selector) => match field {
                Some(Value::Array(items)) => items.iter().any(|item| selector.matches(item)),
                _ => false,
            },
        }
    }
}

/// Equality with array-contains semantics for scalar expectations.
fn equals(field: Option<&Value>, expected: &Value) -> bool {
    match field {
        Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
        Some(value) => value == expected,
        None => expected.is_null(),
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Eq(value) => value.serialize(serializer),
            Self::Ne(value) => single(serializer, "$ne", value),
            Self::In(values) => single(serializer, "$in", values),
            Self::Gte(bound) => single(serializer, "$gte", bound),
            Self::Lte(bound) => single(serializer, "$lte", bound),
            Self::Regex(pattern) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("$regex", pattern.as_str())?;
                if pattern.is_case_insensitive() {
                    map.serialize_entry("$options", "i")?;
                }
                map.end()
            }
            Self::ElemMatch(selector) => single(serializer, "$elemMatch", selector),
        }
    }
}

fn single<S: Serializer, T: Serialize + ?Sized>(
    serializer: S,
    op: &str,
    value: &T,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(op, value)?;
    map.end()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialized_forms() {
        assert_eq!(serde_json::to_value(Condition::eq(true)).unwrap(), json!(true));
        assert_eq!(
            serde_json::to_value(Condition::Ne(FilterValue::Boolean(true))).unwrap(),
            json!({"$ne": true})
        );
        assert_eq!(
            serde_json::to_value(Condition::ilike("red").unwrap()).unwrap(),
            json!({"$regex": "red", "$options": "i"})
        );
        assert_eq!(
            serde_json::to_value(Condition::Regex(Pattern::new("^x", false).unwrap())).unwrap(),
            json!({"$regex": "^x"})
        );
        assert_eq!(
            serde_json::to_value(Condition::Gte(100.0)).unwrap(),
            json!({"$gte": 100.0})
        );
    }

    #[test]
    fn test_ne_matches_missing_field() {
        let cond = Condition::Ne(FilterValue::Boolean(true));
        assert!(cond.matches(None));
        assert!(cond.matches(Some(&json!(false))));
        assert!(!cond.matches(Some(&json!(true))));
    }

    #[test]
    fn test_in_over_array_field() {
        let cond = Condition::In(vec!["T1".into(), "T2".into()]);
        assert!(cond.matches(Some(&json!(["T0", "T2"]))));
        assert!(cond.matches(Some(&json!("T1"))));
        assert!(!cond.matches(Some(&json!(["T3"]))));
        assert!(!cond.matches(None));
    }

    #[test]
    fn test_empty_list_equality() {
        let cond = Condition::Eq(FilterValue::StringList(vec![]));
        assert!(cond.matches(Some(&json!([]))));
        assert!(!cond.matches(Some(&json!(["parent"]))));
        assert!(!cond.matches(None));
    }

    #[test]
    fn test_regex_is_case_insensitive_substring() {
        let cond = Condition::ilike("red").unwrap();
        assert!(cond.matches(Some(&json!("Bright RED shoes"))));
        assert!(!cond.matches(Some(&json!("blue"))));
        assert!(!cond.matches(Some(&json!(42))));
    }

    #[test]
    fn test_invalid_pattern_rejected_on_build() {
        assert!(Condition::ilike("(").is_err());
        assert!(Pattern::new("a(?=b)", false).is_err());
    }

    #[test]
    fn test_pattern_equality_ignores_compiled_form() {
        assert_eq!(Pattern::new("red", true).unwrap(), Pattern::new("red", true).unwrap());
        assert_ne!(Pattern::new("red", true).unwrap(), Pattern::new("red", false).unwrap());
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(Condition::Gte(100.0).matches(Some(&json!(100))));
        assert!(!Condition::Gte(100.0).matches(Some(&json!(99.5))));
        assert!(Condition::Lte(10.0).matches(Some(&json!(9.99))));
        assert!(!Condition::Lte(10.0).matches(None));
    }
}
