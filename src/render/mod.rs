//! Output rendering: JSON report, YAML registry, console summaries.

pub mod json;
pub mod summary;
pub mod yaml;

pub use json::render_filter_report;
pub use summary::{filter_summary, registry_summary};
pub use yaml::render_registry;
