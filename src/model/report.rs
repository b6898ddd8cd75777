//! Filter report: the analysis document plus classified violations, counts
//! and recommendations.

use crate::model::classify::{Classified, ClassifiedViolation, classify};
use crate::model::recommend::{Recommendations, recommend};
use crate::spec::{AnalysisDocument, Violation};

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredResults {
    pub real_violations: Vec<ClassifiedViolation>,
    pub sdk_lag_violations: Vec<ClassifiedViolation>,
    pub unknown_deprecated: Vec<ClassifiedViolation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_violations: usize,
    pub real_issues: usize,
    pub known_sdk_lag: usize,
    pub unknown_deprecated: usize,
    pub attention_needed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterReport {
    pub original_analysis: Value,
    pub filtered_results: FilteredResults,
    pub summary: Summary,
    pub recommendations: Recommendations,
}

impl FilterReport {
    /// Build from a decoded analysis document.
    ///
    /// Fails only when the document is not an object or its `violations`
    /// field is not a list of objects.
    pub fn from_analysis(analysis: Value) -> serde_json::Result<Self> {
        if !analysis.is_object() {
            return Err(serde::de::Error::custom(
                "analysis document must be a JSON object",
            ));
        }
        let violations = AnalysisDocument::deserialize(&analysis)?.into_violations();
        Ok(Self::from_violations(analysis, &violations))
    }

    pub fn from_violations(original_analysis: Value, violations: &[Violation]) -> Self {
        let classified = classify(violations);
        let recommendations = recommend(
            &classified.real,
            &classified.unknown,
            &classified.known_lag,
        );
        let summary = Summary::of(&classified);

        info!(
            total = summary.total_violations,
            attention_needed = summary.attention_needed,
            "filtered violations"
        );

        let Classified {
            real,
            known_lag,
            unknown,
        } = classified;

        Self {
            original_analysis,
            filtered_results: FilteredResults {
                real_violations: real,
                sdk_lag_violations: known_lag,
                unknown_deprecated: unknown,
            },
            summary,
            recommendations,
        }
    }
}

impl Summary {
    fn of(classified: &Classified) -> Self {
        Self {
            total_violations: classified.total(),
            real_issues: classified.real.len(),
            known_sdk_lag: classified.known_lag.len(),
            unknown_deprecated: classified.unknown.len(),
            attention_needed: classified.attention_needed(),
        }
    }
}
