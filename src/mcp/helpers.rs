//! Helper functions for MCP server operations.

use std::path::{Path, PathBuf};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::{
    document::XliffDocument,
    model::{State, TranslationUnit},
    project::{editable_unit, read_document, write_document},
};

/// Default page size for list_units.
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bound for the page size of list_units.
pub const MAX_LIMIT: usize = 200;

/// Serialize `value` as the text content of a successful tool result.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Load an XLIFF file; a missing or invalid file is a parameter error.
pub fn load_document(path: &str) -> Result<XliffDocument, McpError> {
    read_document(Path::new(path)).map_err(|e| McpError::invalid_params(format!("{:#}", e), None))
}

/// Write `document` to `output_path`, or back to `file_path` if none is given.
pub fn save_document(
    document: &mut XliffDocument,
    file_path: &str,
    output_path: Option<&str>,
) -> Result<PathBuf, McpError> {
    let output = PathBuf::from(output_path.unwrap_or(file_path));
    write_document(document, &output)
        .map_err(|e| McpError::internal_error(format!("{:#}", e), None))?;
    Ok(output)
}

/// The unit `id` if its target may be edited.
pub fn require_editable(document: &XliffDocument, id: &str) -> Result<TranslationUnit, McpError> {
    editable_unit(document, id).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Parse one of the four normalized state names.
pub fn parse_state(value: &str) -> Result<State, String> {
    match value.parse::<State>() {
        Ok(State::Other(other)) => Err(format!(
            "unknown state '{}' (expected initial, translated, reviewed or final)",
            other
        )),
        Ok(state) => Ok(state),
        Err(never) => match never {},
    }
}

/// Clamp user-supplied pagination to sane bounds.
pub fn page_bounds(offset: Option<u32>, limit: Option<u32>) -> (usize, usize) {
    let limit = limit
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);
    let offset = offset.map(|v| v as usize).unwrap_or(0);
    (offset, limit)
}
