//! Knobs for registry synthesis. Defaults reproduce the fixed heuristics;
//! the CLI overrides them per run.

use crate::model::policy::PresenceRatio;

pub const DEFAULT_MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Presence percentage above which a span attribute becomes `required`.
    pub required_percent: u32,
    /// Examples kept per attribute definition.
    pub max_examples: usize,
    /// Cap on attribute refs per span group, most frequent first.
    pub max_span_attributes: Option<usize>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            required_percent: PresenceRatio::DEFAULT_PERCENT,
            max_examples: DEFAULT_MAX_EXAMPLES,
            max_span_attributes: None,
        }
    }
}

impl RegistryOptions {
    pub fn requirement_policy(&self) -> PresenceRatio {
        PresenceRatio::new(self.required_percent)
    }
}
