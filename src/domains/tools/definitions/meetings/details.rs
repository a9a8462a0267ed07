//! Per-meeting lookup tools: details, highlights and summary.
//!
//! All three take a single `meetingId` and read one sub-resource of it.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{
    finish, parse_params, read_only_annotations, require_id,
};
use crate::domains::tools::{ToolContext, ToolError};

/// Parameters for tools addressing a single meeting.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeetingIdParams {
    /// MeetGeek meeting identifier.
    #[schemars(description = "MeetGeek meeting ID")]
    pub meeting_id: String,
}

/// Which part of a meeting to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeetingResource {
    Details,
    Highlights,
    Summary,
}

impl MeetingResource {
    fn label(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Highlights => "highlights",
            Self::Summary => "summary",
        }
    }
}

async fn fetch(
    resource: MeetingResource,
    params: &MeetingIdParams,
    ctx: &ToolContext,
) -> Result<Value, ToolError> {
    require_id("meetingId", &params.meeting_id)?;
    info!(
        meeting_id = %params.meeting_id,
        "Fetching meeting {}",
        resource.label()
    );
    let key = ctx.api_key().await?;
    let api = ctx.api();
    let data = match resource {
        MeetingResource::Details => api.meeting_details(&key, &params.meeting_id).await?,
        MeetingResource::Highlights => api.highlights(&key, &params.meeting_id).await?,
        MeetingResource::Summary => api.summary(&key, &params.meeting_id).await?,
    };
    Ok(data)
}

fn meeting_tool(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<MeetingIdParams>(),
        annotations: Some(read_only_annotations()),
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

// ============================================================================
// Meeting details
// ============================================================================

/// Fetches the metadata of one meeting.
pub struct MeetingDetailsTool;

impl MeetingDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "meetingDetails";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the details of a MeetGeek meeting (title, timing, participants and similar metadata) by its meetingId.";

    const ERROR_CONTEXT: &'static str = "Error fetching meeting details";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME))]
    pub async fn execute(params: &MeetingIdParams, ctx: &ToolContext) -> CallToolResult {
        finish(
            Self::ERROR_CONTEXT,
            fetch(MeetingResource::Details, params, ctx).await,
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        meeting_tool(Self::NAME, Self::DESCRIPTION)
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
                let params: MeetingIdParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Highlights
// ============================================================================

/// Fetches the highlights extracted from one meeting.
pub struct HighlightsTool;

impl HighlightsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "highlights";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the highlights (key moments, action items) of a MeetGeek meeting by its meetingId.";

    const ERROR_CONTEXT: &'static str = "Error fetching highlights";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME))]
    pub async fn execute(params: &MeetingIdParams, ctx: &ToolContext) -> CallToolResult {
        finish(
            Self::ERROR_CONTEXT,
            fetch(MeetingResource::Highlights, params, ctx).await,
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        meeting_tool(Self::NAME, Self::DESCRIPTION)
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
                let params: MeetingIdParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Fetches the AI summary of one meeting.
pub struct SummaryTool;

impl SummaryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "summary";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the AI-generated summary of a MeetGeek meeting by its meetingId.";

    const ERROR_CONTEXT: &'static str = "Error fetching summary";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME))]
    pub async fn execute(params: &MeetingIdParams, ctx: &ToolContext) -> CallToolResult {
        finish(
            Self::ERROR_CONTEXT,
            fetch(MeetingResource::Summary, params, ctx).await,
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        meeting_tool(Self::NAME, Self::DESCRIPTION)
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
                let params: MeetingIdParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{StubApi, context, is_error, text_of};
    use serde_json::json;

    fn params(id: &str) -> MeetingIdParams {
        MeetingIdParams {
            meeting_id: id.to_string(),
        }
    }

    #[test]
    fn test_params_use_camel_case() {
        let args = json!({ "meetingId": "m-1" }).as_object().cloned();
        let parsed: MeetingIdParams = parse_params(args).unwrap();
        assert_eq!(parsed.meeting_id, "m-1");

        let args = json!({ "meeting_id": "m-1" }).as_object().cloned();
        let result: Result<MeetingIdParams, _> = parse_params(args);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_each_tool_hits_its_resource() {
        let api = StubApi::ok(json!({ "ok": true }));
        let ctx = context(api.clone(), Some("key-1"));

        assert!(!is_error(&MeetingDetailsTool::execute(&params("m-1"), &ctx).await));
        assert!(!is_error(&HighlightsTool::execute(&params("m-2"), &ctx).await));
        assert!(!is_error(&SummaryTool::execute(&params("m-3"), &ctx).await));

        let ops: Vec<_> = api
            .calls()
            .into_iter()
            .map(|c| (c.operation, c.args["meeting_id"].clone()))
            .collect();
        assert_eq!(
            ops,
            vec![
                ("meeting_details", json!("m-1")),
                ("highlights", json!("m-2")),
                ("summary", json!("m-3")),
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_meeting_id_rejected() {
        let api = StubApi::ok(json!({}));
        let ctx = context(api.clone(), Some("key-1"));

        let result = SummaryTool::execute(&params("   "), &ctx).await;

        assert!(is_error(&result));
        assert_eq!(
            text_of(&result),
            "Error fetching summary: Invalid arguments: meetingId must not be empty"
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dot_meeting_id_rejected() {
        let api = StubApi::ok(json!({ "meetings": [] }));
        let ctx = context(api.clone(), Some("key-1"));

        for id in [".", ".."] {
            let result = MeetingDetailsTool::execute(&params(id), &ctx).await;
            assert!(is_error(&result));
            assert!(text_of(&result).contains("meetingId is not a valid identifier"));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_error_prefixes() {
        let api = StubApi::failing(404);
        let ctx = context(api, Some("key-1"));

        let details = MeetingDetailsTool::execute(&params("m-1"), &ctx).await;
        assert!(text_of(&details).starts_with("Error fetching meeting details: "));

        let highlights = HighlightsTool::execute(&params("m-1"), &ctx).await;
        assert!(text_of(&highlights).starts_with("Error fetching highlights: "));

        let summary = SummaryTool::execute(&params("m-1"), &ctx).await;
        assert_eq!(
            text_of(&summary),
            "Error fetching summary: Request failed with status code 404"
        );
    }
}
