//! Tool-specific error types.

use thiserror::Error;

use crate::domains::meetgeek::ApiError;

/// Errors that can occur while executing a tool call.
///
/// These never escape as protocol errors; tools turn them into error
/// results with a per-tool prefix.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments passed schema validation but are unusable.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Neither the session nor the configuration provides an API key.
    #[error(
        "No MeetGeek API key available: set MEETGEEK_API_KEY or send 'Authorization: Bearer <key>'"
    )]
    MissingApiKey,

    /// The upstream API call failed.
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
