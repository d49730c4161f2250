//! JSON rendering for outline results.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write an outline result as JSON to a writer.
pub fn write_json<W: Write>(result: &OutlineResult, writer: W, format: JsonFormat) -> Result<()> {
    let written = match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, result),
        JsonFormat::Compact => serde_json::to_writer(writer, result),
    };

    written.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
