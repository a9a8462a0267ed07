//! Request shapes sent to the MeetGeek API.

use serde::{Deserialize, Serialize};

/// Cursor pagination shared by the list endpoints.
///
/// Serialized as query parameters; unset fields are left out of the query
/// string rather than sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(cursor: Option<String>, limit: Option<u32>) -> Self {
        Self { cursor, limit }
    }

    /// True when neither a cursor nor a limit is set.
    pub fn is_empty(&self) -> bool {
        self.cursor.is_none() && self.limit.is_none()
    }
}

/// Body of `POST /v1/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecording {
    /// Publicly downloadable URL of the recording.
    pub download_url: String,

    /// Language of the recording, e.g. `en-US`.
    pub language_code: String,

    /// Optional summary template to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}
