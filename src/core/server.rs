//! MCP Server implementation.
//!
//! This module contains the rmcp server handler. It only exposes tools; each
//! tool forwards to the MeetGeek API (see `domains/tools/`).
//!
//! One [`McpServer`] is built at startup. Transports that multiplex callers
//! derive a per-session copy with [`McpServer::with_credentials`], which
//! shares the upstream client but routes calls through that session's key.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use super::credentials::SessionCredentials;
use super::error::Result as ServerResult;
use crate::domains::meetgeek::{MeetGeekClient, MeetingsApi};
use crate::domains::tools::{TOOL_NAMES, ToolContext, build_tool_router};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Upstream API and credentials the tool routes were built with.
    tools: ToolContext,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the upstream client cannot be built from the configured
    /// base URL.
    pub fn new(config: Config) -> ServerResult<Self> {
        let api: Arc<dyn MeetingsApi> = Arc::new(MeetGeekClient::new(&config.upstream)?);
        let credentials = SessionCredentials::new(config.credentials.meetgeek_api_key.clone());
        Ok(Self::with_api(config, api, credentials))
    }

    /// Create a server backed by an arbitrary [`MeetingsApi`] implementation.
    pub fn with_api(
        config: Config,
        api: Arc<dyn MeetingsApi>,
        credentials: SessionCredentials,
    ) -> Self {
        let tools = ToolContext::new(api, credentials);
        Self {
            config: Arc::new(config),
            tool_router: build_tool_router::<Self>(tools.clone()),
            tools,
        }
    }

    /// Derive a server for one session, sharing the upstream client.
    pub fn with_credentials(&self, credentials: SessionCredentials) -> Self {
        let tools = ToolContext::new(self.tools.api_handle(), credentials);
        Self {
            config: self.config.clone(),
            tool_router: build_tool_router::<Self>(tools.clone()),
            tools,
        }
    }

    /// New session credentials seeded with the configured API key.
    pub fn session_credentials(&self) -> SessionCredentials {
        SessionCredentials::new(self.config.credentials.meetgeek_api_key.clone())
    }

    /// Credentials this server's tools resolve keys from.
    pub fn credentials(&self) -> &SessionCredentials {
        self.tools.credentials()
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    fn instructions() -> String {
        format!(
            "Access MeetGeek meeting data. Available tools: {}. \
             Every tool returns the MeetGeek API response as JSON text.",
            TOOL_NAMES.join(", ")
        )
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            instructions: Some(Self::instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
