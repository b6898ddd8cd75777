//! Actionable recommendations derived from classified violations.

use crate::model::classify::ClassifiedViolation;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// How many real violations to include as a sample.
pub const IMMEDIATE_SAMPLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    FixViolations,
    CheckNewDeprecated,
    SdkLag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub count: usize,
    pub message: String,
    pub violations: Vec<ClassifiedViolation>,
}

/// Instrumentation area a deprecated attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkArea {
    Database,
    Messaging,
    Deployment,
    Rpc,
    Other,
}

impl SdkArea {
    pub fn of(attribute: &str) -> Self {
        if attribute.starts_with("db.") {
            Self::Database
        } else if attribute.starts_with("messaging.") {
            Self::Messaging
        } else if attribute.starts_with("deployment.") {
            Self::Deployment
        } else if attribute.starts_with("rpc.") || attribute.starts_with("message.") {
            Self::Rpc
        } else {
            Self::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Messaging => "messaging",
            Self::Deployment => "deployment",
            Self::Rpc => "rpc",
            Self::Other => "other",
        }
    }
}

/// Known-lag violations grouped by area, areas in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaGroups(Vec<(SdkArea, Vec<ClassifiedViolation>)>);

impl AreaGroups {
    fn push(&mut self, area: SdkArea, violation: ClassifiedViolation) {
        match self.0.iter_mut().find(|(a, _)| *a == area) {
            Some((_, bucket)) => bucket.push(violation),
            None => self.0.push((area, vec![violation])),
        }
    }

    pub fn areas(&self) -> impl Iterator<Item = SdkArea> + '_ {
        self.0.iter().map(|(area, _)| *area)
    }

    pub fn get(&self, area: SdkArea) -> Option<&[ClassifiedViolation]> {
        self.0
            .iter()
            .find(|(a, _)| *a == area)
            .map(|(_, bucket)| bucket.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for AreaGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (area, bucket) in &self.0 {
            map.serialize_entry(area.as_str(), bucket)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdkLagItem {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub message: String,
    pub areas: AreaGroups,
    pub total_count: usize,
}

/// The three buckets are always present; a bucket is empty when nothing
/// contributed to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub immediate_action: Vec<ActionItem>,
    pub monitor: Vec<ActionItem>,
    pub sdk_updates: Vec<SdkLagItem>,
}

pub fn recommend(
    real: &[ClassifiedViolation],
    unknown: &[ClassifiedViolation],
    known_lag: &[ClassifiedViolation],
) -> Recommendations {
    let mut out = Recommendations::default();

    if !real.is_empty() {
        out.immediate_action.push(ActionItem {
            kind: RecommendationType::FixViolations,
            count: real.len(),
            message: format!(
                "Fix {} real violations in your application code",
                real.len()
            ),
            violations: real.iter().take(IMMEDIATE_SAMPLE).cloned().collect(),
        });
    }

    if !unknown.is_empty() {
        out.monitor.push(ActionItem {
            kind: RecommendationType::CheckNewDeprecated,
            count: unknown.len(),
            message: format!(
                "Check {} deprecated attributes not in known SDK lag list",
                unknown.len()
            ),
            violations: unknown.to_vec(),
        });
    }

    if !known_lag.is_empty() {
        let mut areas = AreaGroups::default();
        for violation in known_lag {
            areas.push(SdkArea::of(violation.attribute()), violation.clone());
        }
        let names: Vec<&str> = areas.areas().map(SdkArea::as_str).collect();
        out.sdk_updates.push(SdkLagItem {
            kind: RecommendationType::SdkLag,
            message: format!(
                "SDK lag detected in {} areas: {}",
                areas.len(),
                names.join(", ")
            ),
            areas,
            total_count: known_lag.len(),
        });
    }

    out
}
