//! Transcript tool.

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
use crate::domains::tools::definitions::common::{
    finish, parse_params, read_only_annotations, require_id,
};
use crate::domains::tools::{ToolContext, ToolError};

/// Parameters for the transcript tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptParams {
    /// MeetGeek meeting identifier.
    #[schemars(description = "MeetGeek meeting ID")]
    pub meeting_id: String,

    /// Pagination cursor returned by a previous call.
    #[schemars(description = "Pagination cursor from a previous response")]
    #[serde(default)]
    pub cursor: Option<String>,

    /// Maximum number of transcript sentences to return.
    #[schemars(description = "Maximum number of transcript entries to return")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Pages through the transcript of one meeting.
pub struct TranscriptTool;

impl TranscriptTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "transcript";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the transcript of a MeetGeek meeting by its meetingId. Long transcripts are paginated; pass the returned cursor to fetch the next page.";

    const ERROR_CONTEXT: &'static str = "Error fetching transcript";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME, meeting_id = %params.meeting_id))]
    pub async fn execute(params: &TranscriptParams, ctx: &ToolContext) -> CallToolResult {
        finish(Self::ERROR_CONTEXT, Self::fetch(params, ctx).await)
    }

    async fn fetch(params: &TranscriptParams, ctx: &ToolContext) -> Result<Value, ToolError> {
        require_id("meetingId", &params.meeting_id)?;
        info!(cursor = ?params.cursor, limit = ?params.limit, "Fetching transcript");
        let key = ctx.api_key().await?;
        let page = Pagination::new(params.cursor.clone(), params.limit);
        Ok(ctx
            .api()
            .transcript(&key, &params.meeting_id, &page)
            .await?)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TranscriptParams>(),
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
                let params: TranscriptParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
