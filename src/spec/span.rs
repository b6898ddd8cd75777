//! Span records from a captured trace corpus.
//!
//! JSON shape (every field optional):
//! {
//!   "name": "checkout.process",
//!   "kind": "SERVER",                 // or "SPAN_KIND_SERVER", or OTLP code 2
//!   "attributes": { "user.id": "u-1", "amount": 12.5 }
//! }
//!
//! Reading never fails on a single record: absent or odd fields fall back to
//! name `unknown`, kind `INTERNAL` and no attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::warn;

pub const UNKNOWN_SPAN_NAME: &str = "unknown";

/// Semantic type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    String,
    Int,
    Double,
    Boolean,
}

impl AttrType {
    /// Classify by runtime kind only. Booleans are checked before numbers.
    /// Integer literals are `int` at any magnitude.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() || is_integer_literal(n) => Self::Int,
            Value::Number(_) => Self::Double,
            _ => Self::String,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Double => "double",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_integer_literal(n: &Number) -> bool {
    !n.to_string().contains(['.', 'e', 'E'])
}

/// Render a value as an example string. Strings are kept verbatim, anything
/// else uses its compact JSON text.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SpanKind {
    #[default]
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
    /// Kind string we do not recognize, kept verbatim.
    Other(String),
}

impl SpanKind {
    /// Case-insensitive; accepts the OTLP `SPAN_KIND_` prefix.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("SPAN_KIND_").unwrap_or(&upper);
        match bare {
            "" | "INTERNAL" | "UNSPECIFIED" => Self::Internal,
            "SERVER" => Self::Server,
            "CLIENT" => Self::Client,
            "PRODUCER" => Self::Producer,
            "CONSUMER" => Self::Consumer,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// OTLP numeric span kind.
    pub fn from_otlp(code: i64) -> Self {
        match code {
            2 => Self::Server,
            3 => Self::Client,
            4 => Self::Producer,
            5 => Self::Consumer,
            _ => Self::Internal,
        }
    }

    /// Lower-case label used in registry output.
    pub fn label(&self) -> String {
        match self {
            Self::Internal => "internal".to_string(),
            Self::Server => "server".to_string(),
            Self::Client => "client".to_string(),
            Self::Producer => "producer".to_string(),
            Self::Consumer => "consumer".to_string(),
            Self::Other(raw) => raw.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Span {
    pub name: String,
    pub kind: SpanKind,
    pub attributes: Map<String, Value>,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            name: UNKNOWN_SPAN_NAME.to_string(),
            kind: SpanKind::Internal,
            attributes: Map::new(),
        }
    }
}

impl Span {
    pub fn new(name: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl From<Value> for Span {
    fn from(value: Value) -> Self {
        let Value::Object(mut record) = value else {
            warn!("span record is not an object, reading it as an empty span");
            return Span::default();
        };

        let name = match record.remove("name") {
            None | Some(Value::Null) => UNKNOWN_SPAN_NAME.to_string(),
            Some(Value::String(s)) => s,
            Some(other) => {
                warn!(name = %other, "non-string span name, using its JSON text");
                other.to_string()
            }
        };

        let kind = match record.remove("kind") {
            Some(Value::String(s)) => SpanKind::parse(&s),
            Some(Value::Number(n)) => n.as_i64().map(SpanKind::from_otlp).unwrap_or_default(),
            _ => SpanKind::Internal,
        };

        let attributes = match record.remove("attributes") {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Map::new(),
            Some(_) => {
                warn!(span = %name, "span attributes are not an object, ignoring them");
                Map::new()
            }
        };

        Self {
            name,
            kind,
            attributes,
        }
    }
}
