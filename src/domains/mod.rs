//! Domains module containing business logic organized by bounded contexts.
//!
//! - **meetgeek**: client for the upstream meeting API
//! - **tools**: MCP tools that forward calls to that API

pub mod meetgeek;
pub mod tools;
