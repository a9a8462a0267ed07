//! Common utilities shared across the meeting tools.
//!
//! Argument parsing, blank-id checks and the conversion of upstream
//! outcomes into MCP results live here so every tool reports success and
//! failure the same way.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject, ToolAnnotations},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Deserialize tool arguments, reporting schema mismatches as invalid params.
pub fn parse_params<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, McpError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Reject identifiers that are empty or whitespace.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

/// Reject identifiers that cannot stand as one URL path segment.
pub fn require_id(field: &str, value: &str) -> Result<(), ToolError> {
    require_non_blank(field, value)?;
    if matches!(value.trim(), "." | "..") {
        return Err(ToolError::invalid_arguments(format!(
            "{} is not a valid identifier: '{}'",
            field, value
        )));
    }
    Ok(())
}

/// Create a success result holding the upstream JSON, pretty-printed.
pub fn json_result(data: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Create an error result with a `"<context>: <error>"` message.
pub fn error_result(context: &str, error: &ToolError) -> CallToolResult {
    let message = format!("{}: {}", context, error);
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}

/// Turn a tool outcome into a result.
pub fn finish(context: &str, outcome: Result<Value, ToolError>) -> CallToolResult {
    match outcome {
        Ok(data) => json_result(&data),
        Err(e) => error_result(context, &e),
    }
}

/// Annotations for tools that only read from the upstream API.
pub fn read_only_annotations() -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(true),
        destructive_hint: Some(false),
        idempotent_hint: Some(true),
        open_world_hint: Some(true),
    }
}
