//! Corpus statistics: one pass over the spans, per attribute and per
//! operation key.
//!
//! Every accumulator here is a counter or a set, so two results built from
//! disjoint corpora can be merged without re-reading spans.

use crate::model::policy::{DottedPrefix, GroupingPolicy};
use crate::model::tally::Tally;
use crate::spec::{AttrType, Span, SpanKind, stringify_value};

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct AttributeStat {
    /// Observed semantic types, first-seen order.
    pub types: Tally<AttrType>,
    /// Distinct stringified values (unbounded; trimmed at output).
    pub examples: BTreeSet<String>,
    /// Distinct span names carrying this attribute.
    pub span_contexts: BTreeSet<String>,
}

impl AttributeStat {
    fn record(&mut self, span_name: &str, value: &Value) {
        self.types.add(AttrType::of(value));
        self.examples.insert(stringify_value(value));
        if !self.span_contexts.contains(span_name) {
            self.span_contexts.insert(span_name.to_string());
        }
    }

    /// Number of spans that carried the attribute.
    pub fn occurrences(&self) -> u64 {
        self.types.total()
    }

    /// Most frequent type; ties go to the type seen first.
    pub fn inferred_type(&self) -> AttrType {
        self.types.top().copied().unwrap_or(AttrType::String)
    }

    pub fn merge(&mut self, other: &AttributeStat) {
        self.types.merge(&other.types);
        self.examples.extend(other.examples.iter().cloned());
        self.span_contexts
            .extend(other.span_contexts.iter().cloned());
    }
}

#[derive(Debug, Clone, Default)]
pub struct OperationStat {
    pub kinds: Tally<SpanKind>,
    /// Distinct span names mapped to this operation key.
    pub names: BTreeSet<String>,
    /// Per attribute name: number of spans in the group carrying it.
    pub attributes: Tally<String>,
    pub spans: u64,
}

impl OperationStat {
    fn record(&mut self, span: &Span) {
        self.kinds.add(span.kind.clone());
        if !self.names.contains(&span.name) {
            self.names.insert(span.name.clone());
        }
        for attr_name in span.attributes.keys() {
            self.attributes.add(attr_name.clone());
        }
        self.spans += 1;
    }

    /// Most frequent kind; `INTERNAL` when nothing was observed.
    pub fn dominant_kind(&self) -> SpanKind {
        self.kinds.top().cloned().unwrap_or_default()
    }

    pub fn merge(&mut self, other: &OperationStat) {
        self.kinds.merge(&other.kinds);
        self.names.extend(other.names.iter().cloned());
        self.attributes.merge(&other.attributes);
        self.spans += other.spans;
    }
}

/// Aggregated statistics for a span corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    pub attributes: BTreeMap<String, AttributeStat>,
    pub operations: BTreeMap<String, OperationStat>,
    pub spans: u64,
}

impl CorpusStats {
    /// Sum of per-attribute occurrence counts; equals the number of
    /// `(span, attribute)` pairs observed.
    pub fn total_attribute_occurrences(&self) -> u64 {
        self.attributes.values().map(AttributeStat::occurrences).sum()
    }

    pub fn merge(&mut self, other: &CorpusStats) {
        for (name, stat) in &other.attributes {
            self.attributes.entry(name.clone()).or_default().merge(stat);
        }
        for (key, stat) in &other.operations {
            self.operations.entry(key.clone()).or_default().merge(stat);
        }
        self.spans += other.spans;
    }
}

/// Streaming aggregator. Feed spans with [`SpanAggregator::observe`], then
/// take the result with [`SpanAggregator::finish`].
#[derive(Debug, Default)]
pub struct SpanAggregator<P = DottedPrefix> {
    policy: P,
    stats: CorpusStats,
}

impl<P: GroupingPolicy> SpanAggregator<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            stats: CorpusStats::default(),
        }
    }

    pub fn observe(&mut self, span: &Span) {
        for (attr_name, value) in &span.attributes {
            self.stats
                .attributes
                .entry(attr_name.clone())
                .or_default()
                .record(&span.name, value);
        }

        let key = self.policy.key_for(&span.name);
        self.stats.operations.entry(key).or_default().record(span);
        self.stats.spans += 1;
    }

    pub fn finish(self) -> CorpusStats {
        debug!(
            spans = self.stats.spans,
            attributes = self.stats.attributes.len(),
            operations = self.stats.operations.len(),
            "aggregated span corpus"
        );
        self.stats
    }
}

/// Aggregate with the default dotted-prefix grouping.
pub fn aggregate(spans: &[Span]) -> CorpusStats {
    aggregate_with(spans, DottedPrefix)
}

pub fn aggregate_with<P: GroupingPolicy>(spans: &[Span], policy: P) -> CorpusStats {
    let mut agg = SpanAggregator::new(policy);
    for span in spans {
        agg.observe(span);
    }
    agg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checkout_corpus() -> Vec<Span> {
        vec![
            Span::new("checkout.process", SpanKind::Server)
                .with_attribute("user.id", "u-1")
                .with_attribute("amount", 12.5),
            Span::new("checkout.validate", SpanKind::Server).with_attribute("user.id", "u-2"),
        ]
    }

    #[test]
    fn attribute_stats() {
        let stats = aggregate(&checkout_corpus());
        assert_eq!(stats.spans, 2);

        let user = &stats.attributes["user.id"];
        assert_eq!(user.occurrences(), 2);
        assert_eq!(user.inferred_type(), AttrType::String);
        assert_eq!(
            user.examples.iter().collect::<Vec<_>>(),
            vec!["u-1", "u-2"]
        );
        assert_eq!(
            user.span_contexts.iter().collect::<Vec<_>>(),
            vec!["checkout.process", "checkout.validate"]
        );

        let amount = &stats.attributes["amount"];
        assert_eq!(amount.occurrences(), 1);
        assert_eq!(amount.inferred_type(), AttrType::Double);
    }

    #[test]
    fn operation_stats() {
        let stats = aggregate(&checkout_corpus());
        assert_eq!(stats.operations.len(), 1);

        let op = &stats.operations["checkout"];
        assert_eq!(op.spans, 2);
        assert_eq!(op.names.len(), 2);
        assert_eq!(op.dominant_kind(), SpanKind::Server);
        assert_eq!(op.attributes.get("user.id"), 2);
        assert_eq!(op.attributes.get("amount"), 1);
    }

    #[test]
    fn defaults_for_unnamed_spans() {
        let spans = vec![Span::default().with_attribute("x", 1)];
        let stats = aggregate(&spans);
        let op = &stats.operations["unknown"];
        assert_eq!(op.dominant_kind(), SpanKind::Internal);
        assert!(stats.attributes["x"].span_contexts.contains("unknown"));
    }

    #[test]
    fn mixed_types_pick_majority() {
        let spans = vec![
            Span::new("a", SpanKind::Internal).with_attribute("retry", 1),
            Span::new("a", SpanKind::Internal).with_attribute("retry", true),
            Span::new("a", SpanKind::Internal).with_attribute("retry", 2),
        ];
        let stats = aggregate(&spans);
        assert_eq!(stats.attributes["retry"].inferred_type(), AttrType::Int);
        // Same name three times: one distinct name, three spans.
        assert_eq!(stats.operations["a"].names.len(), 1);
        assert_eq!(stats.operations["a"].spans, 3);
    }

    #[test]
    fn occurrences_match_attribute_pairs() {
        let spans = checkout_corpus();
        let stats = aggregate(&spans);
        let pairs: usize = spans.iter().map(|s| s.attributes.len()).sum();
        assert_eq!(stats.total_attribute_occurrences(), pairs as u64);
    }

    #[test]
    fn merge_matches_single_pass() {
        let spans = checkout_corpus();
        let whole = aggregate(&spans);

        let mut left = aggregate(&spans[..1]);
        let right = aggregate(&spans[1..]);
        left.merge(&right);

        assert_eq!(left.spans, whole.spans);
        assert_eq!(
            left.total_attribute_occurrences(),
            whole.total_attribute_occurrences()
        );
        let (l, w) = (&left.operations["checkout"], &whole.operations["checkout"]);
        assert_eq!(l.names, w.names);
        assert_eq!(l.attributes.get("user.id"), w.attributes.get("user.id"));
        assert_eq!(
            left.attributes["user.id"].examples,
            whole.attributes["user.id"].examples
        );
    }

    #[test]
    fn custom_grouping_policy() {
        struct ByName;
        impl GroupingPolicy for ByName {
            fn key_for(&self, span_name: &str) -> String {
                span_name.to_string()
            }
        }
        let stats = aggregate_with(&checkout_corpus(), ByName);
        assert_eq!(
            stats.operations.keys().collect::<Vec<_>>(),
            vec!["checkout.process", "checkout.validate"]
        );
    }
}
