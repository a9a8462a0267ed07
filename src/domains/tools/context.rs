//! Shared state handed to every tool route.

use std::sync::Arc;

use super::ToolError;
use crate::core::credentials::SessionCredentials;
use crate::domains::meetgeek::MeetingsApi;

/// What a tool needs to forward a call: the upstream API and the
/// credentials of the session the call arrived on.
#[derive(Clone)]
pub struct ToolContext {
    api: Arc<dyn MeetingsApi>,
    credentials: SessionCredentials,
}

impl ToolContext {
    pub fn new(api: Arc<dyn MeetingsApi>, credentials: SessionCredentials) -> Self {
        Self { api, credentials }
    }

    /// The upstream API.
    pub fn api(&self) -> &dyn MeetingsApi {
        self.api.as_ref()
    }

    /// Shared handle to the upstream API.
    pub fn api_handle(&self) -> Arc<dyn MeetingsApi> {
        self.api.clone()
    }

    /// Credentials of the session this context belongs to.
    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    /// Resolve the API key for the next upstream call.
    pub async fn api_key(&self) -> Result<String, ToolError> {
        self.credentials
            .api_key()
            .await
            .ok_or(ToolError::MissingApiKey)
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
