//! Input layer: serde shapes of the documents the analysis consumes.
//!
//! This module is intentionally separate from aggregation and rendering.
//! It owns:
//! - Span records from a captured corpus (lenient: missing fields default)
//! - Violation records from an external conformance checker (opaque objects)

pub mod span;
pub mod violation;

pub use span::{AttrType, Span, SpanKind, stringify_value};
pub use violation::{AnalysisDocument, DEPRECATED_ATTRIBUTE, Violation};
