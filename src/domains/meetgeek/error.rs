//! Upstream API error types.

use thiserror::Error;

/// Result type for upstream API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Longest slice of an error body carried into an error message.
const MAX_BODY_CHARS: usize = 500;

/// Errors returned by the MeetGeek API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A path identifier that would not stay a single URL segment.
    #[error("Invalid path segment: '{0}'")]
    InvalidPathSegment(String),

    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status.
    #[error("Request failed with status code {status}{}", format_body(.body))]
    Status { status: u16, body: String },

    /// The response body claimed to be JSON but did not parse.
    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a status error, truncating oversized bodies.
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let body = match body.char_indices().nth(MAX_BODY_CHARS) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Self::Status { status, body }
    }

    /// HTTP status returned by the upstream API, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}
