//! Team meetings tool.

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

/// Parameters for the team meetings tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMeetingsParams {
    /// MeetGeek team identifier.
    #[schemars(description = "MeetGeek team ID")]
    pub team_id: String,

    /// Pagination cursor returned by a previous call.
    #[schemars(description = "Pagination cursor from a previous response")]
    #[serde(default)]
    pub cursor: Option<String>,

    /// Maximum number of meetings to return.
    #[schemars(description = "Maximum number of meetings to return")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Lists the meetings of one team.
pub struct TeamMeetingsTool;

impl TeamMeetingsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "teamMeetings";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the meetings of a MeetGeek team by its teamId. Supports cursor pagination via 'cursor' and 'limit'.";

    const ERROR_CONTEXT: &'static str = "Error fetching team meetings";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME, team_id = %params.team_id))]
    pub async fn execute(params: &TeamMeetingsParams, ctx: &ToolContext) -> CallToolResult {
        finish(Self::ERROR_CONTEXT, Self::fetch(params, ctx).await)
    }

    async fn fetch(params: &TeamMeetingsParams, ctx: &ToolContext) -> Result<Value, ToolError> {
        require_id("teamId", &params.team_id)?;
        info!(cursor = ?params.cursor, limit = ?params.limit, "Listing team meetings");
        let key = ctx.api_key().await?;
        let page = Pagination::new(params.cursor.clone(), params.limit);
        Ok(ctx.api().team_meetings(&key, &params.team_id, &page).await?)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TeamMeetingsParams>(),
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
                let params: TeamMeetingsParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{StubApi, context, is_error, text_of};
    use serde_json::json;

    #[tokio::test]
    async fn test_team_meetings_forwards_team_and_page() {
        let api = StubApi::ok(json!({ "meetings": [] }));
        let ctx = context(api.clone(), Some("key-1"));

        let args = json!({ "teamId": "t-1", "cursor": "next" }).as_object().cloned();
        let params: TeamMeetingsParams = parse_params(args).unwrap();
        let result = TeamMeetingsTool::execute(&params, &ctx).await;

        assert!(!is_error(&result));
        assert_eq!(
            api.calls()[0].args,
            json!({ "team_id": "t-1", "page": { "cursor": "next" } })
        );
    }

    #[tokio::test]
    async fn test_blank_team_id_rejected() {
        let api = StubApi::ok(json!({}));
        let ctx = context(api.clone(), Some("key-1"));

        let params = TeamMeetingsParams {
            team_id: String::new(),
            cursor: None,
            limit: None,
        };
        let result = TeamMeetingsTool::execute(&params, &ctx).await;

        assert!(is_error(&result));
        assert_eq!(
            text_of(&result),
            "Error fetching team meetings: Invalid arguments: teamId must not be empty"
        );
        assert!(api.calls().is_empty());
    }
}
