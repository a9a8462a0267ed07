//! MeetGeek upstream API domain.
//!
//! - `client.rs` - [`MeetingsApi`] trait and its reqwest implementation
//! - `types.rs` - request shapes (pagination, upload body)
//! - `error.rs` - upstream error types

mod client;
mod error;
mod types;

pub use client::{MeetGeekClient, MeetingsApi};
pub use error::{ApiError, ApiResult};
pub use types::{Pagination, UploadRecording};
