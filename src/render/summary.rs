//! Condensed console summaries printed after each command.

use crate::model::{CorpusStats, FilterReport, Registry};

use std::fmt::Write as _;
use std::path::Path;

pub fn filter_summary(report: &FilterReport, out: &Path) -> anyhow::Result<String> {
    let s = &report.summary;
    let recs = &report.recommendations;
    let mut text = String::new();

    writeln!(text, "Filtered violation analysis")?;
    writeln!(text, "{}", "=".repeat(50))?;
    writeln!(text, "Total violations:      {}", s.total_violations)?;
    writeln!(
        text,
        "Real issues:           {} (need immediate attention)",
        s.real_issues
    )?;
    writeln!(text, "Known SDK lag:         {} (expected)", s.known_sdk_lag)?;
    writeln!(
        text,
        "Unknown deprecated:    {} (review)",
        s.unknown_deprecated
    )?;
    writeln!(text)?;
    writeln!(text, "Attention needed: {} violations", s.attention_needed)?;
    if s.attention_needed == 0 {
        writeln!(text, "Only expected SDK lag violations found.")?;
    }
    writeln!(text)?;
    writeln!(text, "Detailed results written to {}", out.display())?;

    if !recs.immediate_action.is_empty() {
        writeln!(text)?;
        writeln!(text, "Immediate action:")?;
        for item in &recs.immediate_action {
            writeln!(text, "  - {}", item.message)?;
        }
    }
    if !recs.monitor.is_empty() {
        writeln!(text)?;
        writeln!(text, "Review:")?;
        for item in &recs.monitor {
            writeln!(text, "  - {}", item.message)?;
        }
    }

    Ok(text)
}

pub fn registry_summary(
    stats: &CorpusStats,
    registry: &Registry,
    out: &Path,
) -> anyhow::Result<String> {
    let mut text = String::new();
    writeln!(text, "Registry written to {}", out.display())?;
    writeln!(text, "Spans analysed:            {}", stats.spans)?;
    writeln!(text, "Unique attributes found:   {}", stats.attributes.len())?;
    writeln!(
        text,
        "Span patterns found:       {}",
        registry.span_groups().count()
    )?;
    Ok(text)
}
