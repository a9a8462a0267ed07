//! Tool Router - builds the rmcp ToolRouter for one session.
//!
//! Every route captures the same [`ToolContext`], so all tools of a session
//! share its upstream client and credentials.

use rmcp::handler::server::tool::ToolRouter;

use super::ToolContext;
use super::definitions::{
    HighlightsTool, ListMeetingsTool, MeetingDetailsTool, MeetingsTool, SummaryTool,
    TeamMeetingsTool, TranscriptTool, UploadRecordingTool,
};

/// Names of every registered tool, in registration order.
pub const TOOL_NAMES: [&str; 8] = [
    MeetingsTool::NAME,
    ListMeetingsTool::NAME,
    MeetingDetailsTool::NAME,
    TranscriptTool::NAME,
    HighlightsTool::NAME,
    SummaryTool::NAME,
    TeamMeetingsTool::NAME,
    UploadRecordingTool::NAME,
];

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: ToolContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(MeetingsTool::create_route(ctx.clone()))
        .with_route(ListMeetingsTool::create_route(ctx.clone()))
        .with_route(MeetingDetailsTool::create_route(ctx.clone()))
        .with_route(TranscriptTool::create_route(ctx.clone()))
        .with_route(HighlightsTool::create_route(ctx.clone()))
        .with_route(SummaryTool::create_route(ctx.clone()))
        .with_route(TeamMeetingsTool::create_route(ctx.clone()))
        .with_route(UploadRecordingTool::create_route(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{StubApi, context};

    struct TestServer {}

    fn test_router() -> ToolRouter<TestServer> {
        build_tool_router(context(StubApi::ok(serde_json::Value::Null), Some("key")))
    }

    #[test]
    fn test_build_router() {
        let tools = test_router().list_all();
        assert_eq!(tools.len(), TOOL_NAMES.len());

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        for name in TOOL_NAMES {
            assert!(names.contains(&name), "missing tool {}", name);
        }
    }

    #[test]
    fn test_schemas_expose_wire_names() {
        let tools = test_router().list_all();
        let schema_of = |name: &str| {
            let tool = tools.iter().find(|t| t.name == name).unwrap();
            serde_json::Value::Object(tool.input_schema.as_ref().clone())
        };

        let transcript = schema_of("transcript");
        assert!(transcript["properties"].get("meetingId").is_some());
        assert!(transcript["properties"].get("cursor").is_some());
        assert!(transcript["properties"].get("limit").is_some());
        assert_eq!(transcript["required"], serde_json::json!(["meetingId"]));

        let team = schema_of("teamMeetings");
        assert!(team["properties"].get("teamId").is_some());

        let upload = schema_of("uploadRecording");
        for field in ["download_url", "language_code", "template_name"] {
            assert!(upload["properties"].get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_read_only_annotations() {
        let tools = test_router().list_all();
        for tool in &tools {
            let read_only = tool
                .annotations
                .as_ref()
                .and_then(|a| a.read_only_hint)
                .unwrap_or(false);
            assert_eq!(read_only, tool.name != UploadRecordingTool::NAME);
        }
    }
}
