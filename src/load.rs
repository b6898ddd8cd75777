//! Reading input documents and writing outputs, with boundary errors.

use crate::diagnostics::InputError;
use crate::spec::Span;

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and decode a JSON document.
pub fn read_json(path: &Path) -> Result<Value, InputError> {
    let text = fs::read_to_string(path).map_err(|e| InputError::from_io(path, e))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| InputError::malformed(path, format!("invalid JSON: {}", e)))?;
    debug!(path = %path.display(), bytes = text.len(), "read JSON document");
    Ok(value)
}

/// Read an analysis document; the top level must be an object.
pub fn load_analysis(path: &Path) -> Result<Value, InputError> {
    let value = read_json(path)?;
    if !value.is_object() {
        return Err(InputError::malformed(
            path,
            "expected a JSON object with a `violations` list",
        ));
    }
    Ok(value)
}

/// Read a span corpus; the top level must be an array.
pub fn load_spans(path: &Path) -> Result<Vec<Span>, InputError> {
    let value = read_json(path)?;
    if !value.is_array() {
        return Err(InputError::malformed(path, "expected a JSON array of spans"));
    }
    let spans: Vec<Span> =
        serde_json::from_value(value).map_err(|e| InputError::malformed(path, e.to_string()))?;
    debug!(path = %path.display(), spans = spans.len(), "loaded span corpus");
    Ok(spans)
}

pub fn write_text(path: &Path, contents: &str) -> Result<(), InputError> {
    fs::write(path, contents).map_err(|e| InputError::unexpected(path, e))
}

/// `analysis.json` -> `analysis_filtered.json`; other names get the suffix
/// appended.
pub fn filtered_output_path(input: &Path) -> std::path::PathBuf {
    let text = input.to_string_lossy();
    match text.strip_suffix(".json") {
        Some(stem) => format!("{}_filtered.json", stem).into(),
        None => format!("{}_filtered.json", text).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn missing_file() {
        let err = read_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, InputError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let file = temp_file("{not json");
        let err = read_json(file.path()).unwrap_err();
        assert!(matches!(err, InputError::MalformedInput { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn spans_must_be_an_array() {
        let file = temp_file(r#"{"name": "x"}"#);
        let err = load_spans(file.path()).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array of spans"));
    }

    #[test]
    fn analysis_must_be_an_object() {
        let file = temp_file("[]");
        assert!(matches!(
            load_analysis(file.path()),
            Err(InputError::MalformedInput { .. })
        ));
    }

    #[test]
    fn spans_load() {
        let file = temp_file(r#"[{"name": "a.b", "kind": "CLIENT"}, {}]"#);
        let spans = load_spans(file.path()).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].name, "unknown");
    }

    #[test]
    fn filtered_path() {
        assert_eq!(
            filtered_output_path(Path::new("out/spans_analysis.json")),
            PathBuf::from("out/spans_analysis_filtered.json")
        );
        assert_eq!(
            filtered_output_path(Path::new("report")),
            PathBuf::from("report_filtered.json")
        );
    }
}
