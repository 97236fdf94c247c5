//! Extracted items and field access for scoring.
//!
//! Only two fields of an item take part in matching: `domain` (compared by
//! equality) and `evidence_span` (compared by overlap). Everything else an
//! extractor emits is carried along and ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the category field
pub const DOMAIN_FIELD: &str = "domain";

/// Name of the evidence text field
pub const EVIDENCE_FIELD: &str = "evidence_span";

/// Errors raised when an item does not expose the fields scoring needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("item must be a JSON object")]
    NotAnObject,
}

/// Anything the matcher can score.
///
/// Implemented for the typed [`Item`] and for raw `serde_json::Value`
/// objects, so callers can score records without committing to a schema.
pub trait Scorable {
    /// The item's category, compared by exact equality
    fn domain(&self) -> Result<&Value, FieldError>;

    /// The item's supporting text
    fn evidence_span(&self) -> Result<&str, FieldError>;
}

/// A single extracted item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Category identifier (any JSON scalar)
    pub domain: Value,

    /// Free-text evidence snippet
    pub evidence_span: String,

    /// Fields not used for scoring
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Create an item with no extra fields
    pub fn new(domain: impl Into<Value>, evidence_span: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            evidence_span: evidence_span.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra (ignored) field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Scorable for Item {
    fn domain(&self) -> Result<&Value, FieldError> {
        Ok(&self.domain)
    }

    fn evidence_span(&self) -> Result<&str, FieldError> {
        Ok(&self.evidence_span)
    }
}

impl Scorable for Value {
    fn domain(&self) -> Result<&Value, FieldError> {
        let object = self.as_object().ok_or(FieldError::NotAnObject)?;
        // A present `null` is a valid domain; only an absent key fails
        object
            .get(DOMAIN_FIELD)
            .ok_or(FieldError::Missing(DOMAIN_FIELD))
    }

    fn evidence_span(&self) -> Result<&str, FieldError> {
        let object = self.as_object().ok_or(FieldError::NotAnObject)?;
        let value = object
            .get(EVIDENCE_FIELD)
            .ok_or(FieldError::Missing(EVIDENCE_FIELD))?;

        value.as_str().ok_or(FieldError::WrongType {
            field: EVIDENCE_FIELD,
            expected: "string",
        })
    }
}

impl<T: Scorable + ?Sized> Scorable for &T {
    fn domain(&self) -> Result<&Value, FieldError> {
        (**self).domain()
    }

    fn evidence_span(&self) -> Result<&str, FieldError> {
        (**self).evidence_span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_keeps_extra_fields() {
        let raw = json!({
            "domain": "loc",
            "evidence_span": "Paris",
            "confidence": 0.9,
            "label": "city"
        });

        let item: Item = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.domain, json!("loc"));
        assert_eq!(item.evidence_span, "Paris");
        assert_eq!(item.extra.get("confidence"), Some(&json!(0.9)));

        // Extras survive a round trip unchanged
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_item_requires_both_fields() {
        let missing_domain = json!({"evidence_span": "Paris"});
        assert!(serde_json::from_value::<Item>(missing_domain).is_err());

        let missing_span = json!({"domain": "loc"});
        assert!(serde_json::from_value::<Item>(missing_span).is_err());
    }

    #[test]
    fn test_value_field_access() {
        let value = json!({"domain": 3, "evidence_span": "text", "other": true});
        assert_eq!(value.domain().unwrap(), &json!(3));
        assert_eq!(value.evidence_span().unwrap(), "text");
    }

    #[test]
    fn test_value_null_domain_is_present() {
        let value = json!({"domain": null, "evidence_span": ""});
        assert_eq!(value.domain().unwrap(), &Value::Null);
    }

    #[test]
    fn test_value_missing_fields() {
        let value = json!({"evidence_span": "text"});
        assert_eq!(value.domain(), Err(FieldError::Missing("domain")));

        let value = json!({"domain": "loc"});
        assert_eq!(value.evidence_span(), Err(FieldError::Missing("evidence_span")));
    }

    #[test]
    fn test_value_wrong_types() {
        let value = json!({"domain": "loc", "evidence_span": 42});
        assert_eq!(
            value.evidence_span(),
            Err(FieldError::WrongType {
                field: "evidence_span",
                expected: "string"
            })
        );

        let value = json!(["loc", "Paris"]);
        assert_eq!(value.domain(), Err(FieldError::NotAnObject));
    }

    #[test]
    fn test_builder() {
        let item = Item::new("org", "UN").with_field("source", "model-a");
        assert_eq!(item.domain, json!("org"));
        assert_eq!(item.extra.get("source"), Some(&json!("model-a")));
    }
}
