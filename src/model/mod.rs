//! Analysis model: violation triage and registry inference.
//!
//! Nothing in here touches the filesystem or fails on odd input; the load
//! and render layers own I/O.

pub mod aggregate;
pub mod classify;
pub mod policy;
pub mod recommend;
pub mod registry;
pub mod report;
pub mod tally;

pub use aggregate::{AttributeStat, CorpusStats, OperationStat, SpanAggregator, aggregate};
pub use classify::{Classified, ClassifiedViolation, ViolationCategory, classify};
pub use policy::{DottedPrefix, GroupingPolicy, PresenceRatio, RequirementLevel, RequirementPolicy};
pub use recommend::{Recommendations, SdkArea, recommend};
pub use registry::{Registry, RegistryGroup, namespace_from_spans, synthesize};
pub use report::{FilterReport, Summary};
