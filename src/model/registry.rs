//! Registry synthesis: corpus statistics -> attribute group + span groups.
//!
//! Output shape (YAML):
//! groups:
//!   - id: registry.<ns>.attributes
//!     type: attribute_group
//!     brief: ...
//!     attributes: [{name, type, brief, examples, requirement_level, stability}]
//!   - id: span.<ns>.<operation key>
//!     type: span
//!     span_kind: server
//!     brief: ...
//!     attributes: [{ref, requirement_level}]

use crate::config::RegistryOptions;
use crate::model::aggregate::CorpusStats;
use crate::model::policy::{RequirementLevel, RequirementPolicy};
use crate::spec::{AttrType, Span, stringify_value};

use serde::Serialize;
use tracing::debug;

/// Namespace used when the corpus does not name its service.
pub const DEFAULT_NAMESPACE: &str = "myapp";

const SERVICE_NAME: &str = "service.name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    AttributeGroup,
    Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Development,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: AttrType,
    pub brief: String,
    pub examples: Vec<String>,
    pub requirement_level: RequirementLevel,
    pub stability: Stability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeGroup {
    pub id: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub brief: String,
    pub attributes: Vec<AttributeDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRef {
    #[serde(rename = "ref")]
    pub reference: String,
    pub requirement_level: RequirementLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanGroup {
    pub id: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub span_kind: String,
    pub brief: String,
    pub attributes: Vec<AttributeRef>,
}

impl SpanGroup {
    pub fn attribute(&self, name: &str) -> Option<&AttributeRef> {
        self.attributes.iter().find(|a| a.reference == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegistryGroup {
    Attributes(AttributeGroup),
    Span(SpanGroup),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registry {
    pub groups: Vec<RegistryGroup>,
}

impl Registry {
    pub fn attribute_group(&self) -> Option<&AttributeGroup> {
        self.groups.iter().find_map(|g| match g {
            RegistryGroup::Attributes(group) => Some(group),
            RegistryGroup::Span(_) => None,
        })
    }

    pub fn span_groups(&self) -> impl Iterator<Item = &SpanGroup> {
        self.groups.iter().filter_map(|g| match g {
            RegistryGroup::Span(group) => Some(group),
            RegistryGroup::Attributes(_) => None,
        })
    }

    pub fn span_group(&self, id: &str) -> Option<&SpanGroup> {
        self.span_groups().find(|g| g.id == id)
    }
}

/// Lower-case, spaces and hyphens to `_`.
pub fn normalize_namespace(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Namespace from the first span's `service.name`, else [`DEFAULT_NAMESPACE`].
pub fn namespace_from_spans(spans: &[Span]) -> String {
    let service = spans
        .first()
        .and_then(|span| span.attribute(SERVICE_NAME))
        .map(stringify_value)
        .map(|raw| normalize_namespace(&raw))
        .filter(|ns| !ns.is_empty());

    service.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

/// Synthesize with the presence-ratio policy configured in `options`.
pub fn synthesize(stats: &CorpusStats, namespace: &str, options: &RegistryOptions) -> Registry {
    synthesize_with(stats, namespace, options, &options.requirement_policy())
}

pub fn synthesize_with<R: RequirementPolicy + ?Sized>(
    stats: &CorpusStats,
    namespace: &str,
    options: &RegistryOptions,
    policy: &R,
) -> Registry {
    let mut groups = Vec::with_capacity(stats.operations.len() + 1);

    let attributes = stats
        .attributes
        .iter()
        .map(|(name, stat)| AttributeDef {
            name: name.clone(),
            attr_type: stat.inferred_type(),
            brief: format!("Attribute {}", name),
            examples: stat
                .examples
                .iter()
                .take(options.max_examples)
                .cloned()
                .collect(),
            requirement_level: RequirementLevel::Recommended,
            stability: Stability::Development,
        })
        .collect();

    groups.push(RegistryGroup::Attributes(AttributeGroup {
        id: format!("registry.{}.attributes", namespace),
        group_type: GroupType::AttributeGroup,
        brief: format!("Common attributes of {}", namespace),
        attributes,
    }));

    for (key, op) in &stats.operations {
        let distinct_names = op.names.len();
        let cap = options.max_span_attributes.unwrap_or(usize::MAX);

        let attributes = op
            .attributes
            .most_common()
            .into_iter()
            .take(cap)
            .map(|(name, count)| AttributeRef {
                reference: name.clone(),
                requirement_level: policy.level_for(count, distinct_names),
            })
            .collect();

        groups.push(RegistryGroup::Span(SpanGroup {
            id: format!("span.{}.{}", namespace, key),
            group_type: GroupType::Span,
            span_kind: op.dominant_kind().label(),
            brief: format!("Span for operation {}", key),
            attributes,
        }));
    }

    debug!(
        namespace,
        attributes = stats.attributes.len(),
        span_groups = stats.operations.len(),
        "synthesized registry"
    );
    Registry { groups }
}
