//! Violation records reported by an external conformance checker.
//!
//! JSON shape of the analysis document:
//! {
//!   "violations": [
//!     { "attribute": "db.statement", "type": "deprecated_attribute", ... },
//!     ...
//!   ],
//!   ...                                // anything else is passed through
//! }
//!
//! Records are kept as opaque objects so fields we do not know about survive
//! in their original order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rule type the checker uses for deprecated attribute findings.
pub const DEPRECATED_ATTRIBUTE: &str = "deprecated_attribute";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violation(Map<String, Value>);

impl Violation {
    pub fn new(attribute: impl Into<String>, rule: impl Into<String>) -> Self {
        let mut record = Map::new();
        record.insert("attribute".to_string(), Value::String(attribute.into()));
        record.insert("type".to_string(), Value::String(rule.into()));
        Self(record)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Attribute name; empty when absent or not a string.
    pub fn attribute(&self) -> &str {
        self.0.get("attribute").and_then(Value::as_str).unwrap_or("")
    }

    /// Checker rule type; empty when absent or not a string.
    pub fn rule(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or("")
    }

    pub fn is_deprecation(&self) -> bool {
        self.rule() == DEPRECATED_ATTRIBUTE
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Violation {
    fn from(record: Map<String, Value>) -> Self {
        Self(record)
    }
}

/// The part of the analysis document the classifier reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisDocument {
    #[serde(default)]
    pub violations: Option<Vec<Violation>>,
}

impl AnalysisDocument {
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn accessors_default_to_empty() {
        let v: Violation = serde_json::from_value(json!({"severity": "high"})).unwrap();
        assert_eq!(v.attribute(), "");
        assert_eq!(v.rule(), "");
        assert!(!v.is_deprecation());
    }

    #[test]
    fn unknown_fields_keep_their_order() {
        let v: Violation = serde_json::from_value(json!({
            "zeta": 1,
            "attribute": "db.name",
            "alpha": 2,
            "type": "deprecated_attribute"
        }))
        .unwrap();
        assert!(v.is_deprecation());
        assert_eq!(
            v.record().keys().collect::<Vec<_>>(),
            vec!["zeta", "attribute", "alpha", "type"]
        );
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"zeta":1,"attribute":"db.name","alpha":2,"type":"deprecated_attribute"}"#
        );
    }

    #[test]
    fn document_without_violations() {
        let doc: AnalysisDocument = serde_json::from_value(json!({"spans": 3})).unwrap();
        assert!(doc.into_violations().is_empty());
        let doc: AnalysisDocument =
            serde_json::from_value(json!({"violations": null})).unwrap();
        assert!(doc.into_violations().is_empty());
    }

    #[test]
    fn non_object_violation_is_rejected() {
        let res: Result<AnalysisDocument, _> =
            serde_json::from_value(json!({"violations": ["db.name"]}));
        assert!(res.is_err());
    }
}
