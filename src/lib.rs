//! semconv-audit: semantic-convention checks for captured spans.
//!
//! Two pipelines share this crate:
//! - violation triage: checker findings -> real issues / known SDK lag /
//!   unknown deprecations, plus recommendations ([`model::report`])
//! - registry inference: span corpus -> attribute and span group definitions
//!   ([`model::aggregate`], [`model::registry`])

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod load;
pub mod model;
pub mod render;
pub mod spec;

pub type Result<T> = anyhow::Result<T>;
