//! Shared helper functions for MCP tool implementations.

use std::fmt::Display;

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Wrap text as a single-item tool result.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Log a handler failure and return the tool's fixed failure message.
///
/// The error goes to the diagnostic log only; the host sees `message`.
pub fn failure_result(tool: &str, message: &str, error: &dyn Display) -> CallToolResult {
    tracing::error!(tool, error = %error, "{message}");
    text_result(message)
}

/// Pretty-print a remote JSON document, or fall back to the failure message.
pub fn json_result<E: Display>(
    tool: &str,
    message: &str,
    result: Result<Value, E>,
) -> CallToolResult {
    match result {
        Ok(document) => match serde_json::to_string_pretty(&document) {
            Ok(text) => text_result(text),
            Err(e) => failure_result(tool, message, &e),
        },
        Err(e) => failure_result(tool, message, &e),
    }
}
