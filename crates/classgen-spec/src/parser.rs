use crate::types::class::ClassSpec;
use crate::types::error::{ErrorEntry, E_PARSE_ERROR};

/// Parse a `*.class.json` description
#[allow(clippy::result_large_err)]
pub fn parse_class(content: &str, file_path: &str) -> Result<ClassSpec, ErrorEntry> {
    serde_json::from_str(content).map_err(|e| serde_error_to_entry(e, file_path))
}

/// Convert a serde_json error into a structured ErrorEntry
fn serde_error_to_entry(err: serde_json::Error, file_path: &str) -> ErrorEntry {
    let line = err.line();
    let col = err.column();
    let path = format!("$.line:{line}:col:{col}");

    ErrorEntry::error(
        E_PARSE_ERROR,
        format!("JSON parse error: {err}"),
        file_path,
        &path,
    )
    .with_suggestion("Check JSON syntax, field names and modifier/access spellings")
}
