//! Meeting listing tools.
//!
//! `meetings` and its alias `listMeetings` page through the meetings visible
//! to the API key.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::meetgeek::Pagination;
use crate::domains::tools::definitions::common::{finish, parse_params, read_only_annotations};
use crate::domains::tools::{ToolContext, ToolError};

const ERROR_CONTEXT: &str = "Error fetching meetings";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for listing meetings.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListMeetingsParams {
    /// Pagination cursor returned by a previous call.
    #[schemars(description = "Pagination cursor from a previous response")]
    #[serde(default)]
    pub cursor: Option<String>,

    /// Maximum number of meetings to return.
    #[schemars(description = "Maximum number of meetings to return")]
    #[serde(default)]
    pub limit: Option<u32>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Lists meetings.
pub struct MeetingsTool;

impl MeetingsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "meetings";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List MeetGeek meetings available to the API key. Supports cursor pagination via 'cursor' and 'limit'. Returns the raw API response as JSON.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME))]
    pub async fn execute(params: &ListMeetingsParams, ctx: &ToolContext) -> CallToolResult {
        finish(ERROR_CONTEXT, list_meetings(params, ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListMeetingsParams>(),
            annotations: Some(read_only_annotations()),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the given context.
    pub fn create_route<S>(ctx: ToolContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone();
            let ctx = ctx.clone();
            async move {
                let params: ListMeetingsParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

/// Alias of [`MeetingsTool`] kept for clients that use the longer name.
pub struct ListMeetingsTool;

impl ListMeetingsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "listMeetings";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List MeetGeek meetings (alias of 'meetings'). Supports 'cursor' and 'limit'.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME))]
    pub async fn execute(params: &ListMeetingsParams, ctx: &ToolContext) -> CallToolResult {
        finish(ERROR_CONTEXT, list_meetings(params, ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListMeetingsParams>(),
            annotations: Some(read_only_annotations()),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the given context.
    pub fn create_route<S>(ctx: ToolContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone();
            let ctx = ctx.clone();
            async move {
                let params: ListMeetingsParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

async fn list_meetings(params: &ListMeetingsParams, ctx: &ToolContext) -> Result<Value, ToolError> {
    info!(
        cursor = ?params.cursor,
        limit = ?params.limit,
        "Listing meetings"
    );
    let key = ctx.api_key().await?;
    let page = Pagination::new(params.cursor.clone(), params.limit);
    Ok(ctx.api().list_meetings(&key, &page).await?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{StubApi, context, is_error, text_of};
    use serde_json::json;

    #[tokio::test]
    async fn test_meetings_returns_pretty_json() {
        let api = StubApi::ok(json!({ "meetings": [{ "meeting_id": "m-1" }] }));
        let ctx = context(api.clone(), Some("key-1"));

        let params = ListMeetingsParams {
            cursor: Some("c-1".to_string()),
            limit: Some(5),
        };
        let result = MeetingsTool::execute(&params, &ctx).await;

        assert!(!is_error(&result));
        let text = text_of(&result);
        assert!(text.contains("\n  \"meetings\": ["));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["meetings"][0]["meeting_id"], "m-1");

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].operation, "list_meetings");
        assert_eq!(calls[0].api_key, "key-1");
        assert_eq!(calls[0].args, json!({ "cursor": "c-1", "limit": 5 }));
    }

    #[tokio::test]
    async fn test_alias_uses_same_upstream_call() {
        let api = StubApi::ok(json!({ "meetings": [] }));
        let ctx = context(api.clone(), Some("key-1"));

        let result = ListMeetingsTool::execute(&ListMeetingsParams::default(), &ctx).await;

        assert!(!is_error(&result));
        assert_eq!(api.calls()[0].operation, "list_meetings");
        assert_eq!(api.calls()[0].args, json!({}));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error_result() {
        let api = StubApi::failing(401);
        let ctx = context(api, Some("bad-key"));

        let result = MeetingsTool::execute(&ListMeetingsParams::default(), &ctx).await;

        assert!(is_error(&result));
        assert_eq!(
            text_of(&result),
            "Error fetching meetings: Request failed with status code 401"
        );
    }

    #[tokio::test]
    async fn test_missing_key_skips_upstream() {
        let api = StubApi::ok(json!({}));
        let ctx = context(api.clone(), None);

        let result = MeetingsTool::execute(&ListMeetingsParams::default(), &ctx).await;

        assert!(is_error(&result));
        assert!(text_of(&result).starts_with("Error fetching meetings: No MeetGeek API key"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_session_key_overrides_fallback() {
        let api = StubApi::ok(json!({}));
        let ctx = context(api.clone(), Some("configured"));
        ctx.credentials().set_bearer("from-client").await;

        MeetingsTool::execute(&ListMeetingsParams::default(), &ctx).await;

        assert_eq!(api.calls()[0].api_key, "from-client");
    }

    #[test]
    fn test_params_reject_wrong_types() {
        let args = json!({ "limit": "ten" }).as_object().cloned();
        let result: Result<ListMeetingsParams, _> = parse_params(args);
        assert!(result.is_err());

        let args = json!({ "cursor": null }).as_object().cloned();
        let params: ListMeetingsParams = parse_params(args).unwrap();
        assert!(params.cursor.is_none());
    }
}
