use crate::model::FilterReport;

/// Render the filter report as pretty JSON (two-space indent).
pub fn render_filter_report(report: &FilterReport) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
