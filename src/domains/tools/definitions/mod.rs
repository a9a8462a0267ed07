//! Tool definitions module.
//!
//! This module exports all available tool definitions, grouped by the
//! upstream resource they address.

pub mod common;
pub mod meetings;
pub mod recordings;
pub mod teams;

pub use meetings::{
    HighlightsTool, ListMeetingsTool, MeetingDetailsTool, MeetingsTool, SummaryTool,
    TranscriptTool,
};
pub use recordings::UploadRecordingTool;
pub use teams::TeamMeetingsTool;
