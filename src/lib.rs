//! MeetGeek MCP Server Library
//!
//! This crate exposes the MeetGeek meeting API as Model Context Protocol
//! tools, served over stdin/stdout or HTTP + Server-Sent-Events.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, credentials, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **meetgeek**: typed async client for the upstream REST API
//!   - **tools**: MCP tools that forward to the client
//!
//! # Example
//!
//! ```rust,no_run
//! use meetgeek_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
