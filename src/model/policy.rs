//! Grouping and requirement heuristics.
//!
//! Both are deliberately simple. They sit behind traits so the aggregation
//! and synthesis code does not care which strategy is plugged in.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::spec::span::UNKNOWN_SPAN_NAME;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Maps a span name to the operation family it belongs to.
pub trait GroupingPolicy {
    fn key_for(&self, span_name: &str) -> String;
}

/// Drop the last dot-separated segment.
///
/// `db.query.select` -> `db.query`. Single-segment names are lower-cased with
/// whitespace runs collapsed to `_` (`HTTP GET` -> `http_get`). Empty names
/// map to `unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedPrefix;

impl GroupingPolicy for DottedPrefix {
    fn key_for(&self, span_name: &str) -> String {
        if let Some((prefix, _last)) = span_name.rsplit_once('.') {
            return prefix.to_string();
        }

        let trimmed = span_name.trim();
        if trimmed.is_empty() {
            return UNKNOWN_SPAN_NAME.to_string();
        }
        WHITESPACE_RUN
            .replace_all(&trimmed.to_lowercase(), "_")
            .into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Required,
    Recommended,
}

impl RequirementLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
        }
    }
}

/// Decides how strongly a span group should ask for an attribute.
pub trait RequirementPolicy {
    fn level_for(&self, occurrences: u64, distinct_names: usize) -> RequirementLevel;
}

/// `required` when the attribute's occurrence count is strictly above
/// `percent`% of the distinct span names in the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceRatio {
    pub percent: u32,
}

impl PresenceRatio {
    pub const DEFAULT_PERCENT: u32 = 80;

    pub fn new(percent: u32) -> Self {
        Self { percent }
    }
}

impl Default for PresenceRatio {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERCENT)
    }
}

impl RequirementPolicy for PresenceRatio {
    fn level_for(&self, occurrences: u64, distinct_names: usize) -> RequirementLevel {
        if distinct_names == 0 {
            return RequirementLevel::Recommended;
        }
        // Integer compare: occurrences / names > percent / 100.
        let lhs = u128::from(occurrences) * 100;
        let rhs = distinct_names as u128 * u128::from(self.percent);
        if lhs > rhs {
            RequirementLevel::Required
        } else {
            RequirementLevel::Recommended
        }
    }
}
