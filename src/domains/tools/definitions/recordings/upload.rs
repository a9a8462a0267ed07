//! Upload recording tool.
//!
//! Asks MeetGeek to fetch a recording from a public URL and process it like
//! a recorded meeting.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool, ToolAnnotations},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::meetgeek::UploadRecording;
use crate::domains::tools::definitions::common::{finish, parse_params, require_non_blank};
use crate::domains::tools::{ToolContext, ToolError};

/// Parameters for the upload recording tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UploadRecordingParams {
    /// Publicly downloadable URL of the recording.
    #[schemars(description = "Publicly downloadable URL of the audio/video recording")]
    pub download_url: String,

    /// Language spoken in the recording.
    #[schemars(description = "Language code of the recording, e.g. en-US")]
    pub language_code: String,

    /// Summary template to apply.
    #[schemars(description = "Optional MeetGeek template name to apply")]
    #[serde(default)]
    pub template_name: Option<String>,
}

impl From<&UploadRecordingParams> for UploadRecording {
    fn from(params: &UploadRecordingParams) -> Self {
        Self {
            download_url: params.download_url.trim().to_string(),
            language_code: params.language_code.trim().to_string(),
            template_name: params
                .template_name
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }
}

/// Submits a recording for processing.
pub struct UploadRecordingTool;

impl UploadRecordingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "uploadRecording";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Upload a meeting recording to MeetGeek for transcription and analysis. MeetGeek downloads the file from 'download_url'; 'language_code' sets the transcription language and 'template_name' optionally selects a summary template.";

    const ERROR_CONTEXT: &'static str = "Error uploading recording";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tool = Self::NAME))]
    pub async fn execute(params: &UploadRecordingParams, ctx: &ToolContext) -> CallToolResult {
        finish(Self::ERROR_CONTEXT, Self::upload(params, ctx).await)
    }

    async fn upload(params: &UploadRecordingParams, ctx: &ToolContext) -> Result<Value, ToolError> {
        require_non_blank("download_url", &params.download_url)?;
        require_non_blank("language_code", &params.language_code)?;
        let body = UploadRecording::from(params);
        info!(
            language_code = %body.language_code,
            template_name = ?body.template_name,
            "Uploading recording"
        );
        let key = ctx.api_key().await?;
        Ok(ctx.api().upload_recording(&key, &body).await?)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UploadRecordingParams>(),
            annotations: Some(ToolAnnotations {
                title: None,
                read_only_hint: Some(false),
                destructive_hint: Some(false),
                idempotent_hint: Some(false),
                open_world_hint: Some(true),
            }),
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
                let params: UploadRecordingParams = parse_params(args)?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
