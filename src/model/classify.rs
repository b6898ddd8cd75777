//! Split checker violations into real issues, known SDK lag and unknown
//! deprecations.
//!
//! Input records are never modified. Each output record is a copy; deprecation
//! findings get a `category` field (and `replacement` for known lag) appended,
//! real violations are passed through in their input shape.

use crate::catalog;
use crate::spec::Violation;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    RealViolation,
    KnownSdkLag,
    UnknownDeprecated,
}

impl ViolationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RealViolation => "real_violation",
            Self::KnownSdkLag => "known_sdk_lag",
            Self::UnknownDeprecated => "unknown_deprecated",
        }
    }
}

/// A violation record augmented with its category.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedViolation {
    record: Map<String, Value>,
    category: ViolationCategory,
}

impl ClassifiedViolation {
    /// `replacement` is only written when given: `Some(None)` becomes `null`.
    /// Real violations keep their record unchanged.
    fn new(
        source: &Violation,
        category: ViolationCategory,
        replacement: Option<Option<&str>>,
    ) -> Self {
        let mut record = source.record().clone();
        if category == ViolationCategory::RealViolation {
            return Self { record, category };
        }
        record.insert(
            "category".to_string(),
            Value::String(category.as_str().to_string()),
        );
        if let Some(replacement) = replacement {
            let value = replacement.map_or(Value::Null, |r| Value::String(r.to_string()));
            record.insert("replacement".to_string(), value);
        }
        Self { record, category }
    }

    pub fn category(&self) -> ViolationCategory {
        self.category
    }

    pub fn attribute(&self) -> &str {
        self.record
            .get("attribute")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Catalogued replacement; `None` both for "no replacement" and for
    /// categories that carry none.
    pub fn replacement(&self) -> Option<&str> {
        self.record.get("replacement").and_then(Value::as_str)
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }
}

impl Serialize for ClassifiedViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

/// Classifier output; each bucket keeps input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    pub real: Vec<ClassifiedViolation>,
    pub known_lag: Vec<ClassifiedViolation>,
    pub unknown: Vec<ClassifiedViolation>,
}

impl Classified {
    pub fn total(&self) -> usize {
        self.real.len() + self.known_lag.len() + self.unknown.len()
    }

    /// Violations that need a human: real issues plus unknown deprecations.
    pub fn attention_needed(&self) -> usize {
        self.real.len() + self.unknown.len()
    }
}

pub fn classify(violations: &[Violation]) -> Classified {
    let mut out = Classified::default();

    for violation in violations {
        if !violation.is_deprecation() {
            out.real.push(ClassifiedViolation::new(
                violation,
                ViolationCategory::RealViolation,
                None,
            ));
            continue;
        }

        match catalog::replacement_for(violation.attribute()) {
            Some(replacement) => out.known_lag.push(ClassifiedViolation::new(
                violation,
                ViolationCategory::KnownSdkLag,
                Some(replacement),
            )),
            None => out.unknown.push(ClassifiedViolation::new(
                violation,
                ViolationCategory::UnknownDeprecated,
                None,
            )),
        }
    }

    debug!(
        total = violations.len(),
        real = out.real.len(),
        known_lag = out.known_lag.len(),
        unknown = out.unknown.len(),
        "classified violations"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::DEPRECATED_ATTRIBUTE;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn deprecated(attr: &str) -> Violation {
        Violation::new(attr, DEPRECATED_ATTRIBUTE)
    }

    #[test]
    fn catalogued_attribute_is_known_lag() {
        let out = classify(&[deprecated("db.statement")]);
        assert_eq!(out.known_lag.len(), 1);
        let v = &out.known_lag[0];
        assert_eq!(v.category(), ViolationCategory::KnownSdkLag);
        assert_eq!(v.replacement(), Some("db.query.text"));
    }

    #[test]
    fn removed_attribute_has_null_replacement() {
        let out = classify(&[deprecated("enduser.scope")]);
        let v = &out.known_lag[0];
        assert_eq!(v.replacement(), None);
        assert_eq!(v.record().get("replacement"), Some(&Value::Null));
    }

    #[test]
    fn uncatalogued_deprecation_is_unknown() {
        let out = classify(&[deprecated("totally.new.thing")]);
        assert_eq!(out.unknown.len(), 1);
        assert_eq!(out.unknown[0].category(), ViolationCategory::UnknownDeprecated);
        assert!(!out.unknown[0].record().contains_key("replacement"));
    }

    #[test]
    fn other_rules_are_real_even_for_catalogued_names() {
        let out = classify(&[Violation::new("db.statement", "other_rule")]);
        assert_eq!(out.real.len(), 1);
        assert_eq!(out.real[0].category(), ViolationCategory::RealViolation);
        assert!(!out.real[0].record().contains_key("category"));
        assert!(out.known_lag.is_empty());
    }

    #[test]
    fn real_violation_serializes_as_its_input() {
        let input =
            Violation::new("http.route", "missing_attribute").with_field("span", "GET /");
        let out = classify(std::slice::from_ref(&input));
        assert_eq!(
            serde_json::to_value(&out.real[0]).unwrap(),
            json!({"attribute": "http.route", "type": "missing_attribute", "span": "GET /"})
        );
        assert_eq!(
            serde_json::to_value(&out.real[0]).unwrap(),
            serde_json::to_value(&input).unwrap()
        );
    }

    #[test]
    fn partition_keeps_order_and_count() {
        let input = vec![
            Violation::new("a", "missing_attribute"),
            deprecated("db.name"),
            deprecated("x.y"),
            Violation::new("b", "wrong_type"),
            deprecated("message.id"),
        ];
        let out = classify(&input);
        assert_eq!(out.total(), input.len());
        assert_eq!(out.attention_needed(), 3);
        let attrs = |bucket: &[ClassifiedViolation]| {
            bucket.iter().map(|v| v.attribute().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(attrs(&out.real), vec!["a", "b"]);
        assert_eq!(attrs(&out.known_lag), vec!["db.name", "message.id"]);
        assert_eq!(attrs(&out.unknown), vec!["x.y"]);
    }

    #[test]
    fn input_is_not_mutated_and_fields_are_kept() {
        let original: Violation = serde_json::from_value(json!({
            "span": "GET /",
            "attribute": "db.user",
            "type": "deprecated_attribute",
            "severity": "warn"
        }))
        .unwrap();
        let snapshot = original.clone();
        let out = classify(std::slice::from_ref(&original));

        assert_eq!(original, snapshot);
        assert_eq!(
            serde_json::to_value(&out.known_lag[0]).unwrap(),
            json!({
                "span": "GET /",
                "attribute": "db.user",
                "type": "deprecated_attribute",
                "severity": "warn",
                "category": "known_sdk_lag",
                "replacement": null
            })
        );
        assert_eq!(
            out.known_lag[0].record().keys().collect::<Vec<_>>(),
            vec!["span", "attribute", "type", "severity", "category", "replacement"]
        );
    }

    #[test]
    fn existing_category_field_is_overwritten_in_place() {
        let v = Violation::new("q", DEPRECATED_ATTRIBUTE)
            .with_field("category", "stale")
            .with_field("note", 1);
        let out = classify(&[v]);
        assert_eq!(
            out.unknown[0].record().keys().collect::<Vec<_>>(),
            vec!["attribute", "type", "category", "note"]
        );
        assert_eq!(out.unknown[0].record()["category"], json!("unknown_deprecated"));
    }

    #[test]
    fn existing_category_field_on_real_violation_is_left_alone() {
        let v = Violation::new("q", "other").with_field("category", "stale");
        let out = classify(&[v]);
        assert_eq!(out.real[0].record()["category"], json!("stale"));
    }
}
