//! Tools domain module.
//!
//! Tools are the operations MCP clients call. Each one forwards to a single
//! MeetGeek endpoint and returns the upstream JSON as text content.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations, grouped by resource
//! - `context.rs` - Upstream client + session credentials shared by routes
//! - `router.rs` - ToolRouter builder used by the server handler
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a method to `MeetingsApi` and implement it on `MeetGeekClient`
//! 2. Create the tool in `definitions/` with params, `execute()` and `create_route()`
//! 3. Export it in `definitions/mod.rs`
//! 4. Add its route and name in `router.rs`

mod context;
pub mod definitions;
mod error;
pub mod router;

pub use context::ToolContext;
pub use error::ToolError;
pub use router::{TOOL_NAMES, build_tool_router};
