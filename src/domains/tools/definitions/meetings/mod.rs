//! Meeting tools.
//!
//! - `list`: `meetings` and its `listMeetings` alias
//! - `details`: `meetingDetails`, `highlights`, `summary`
//! - `transcript`: paginated `transcript`

pub mod details;
pub mod list;
pub mod transcript;

pub use details::{HighlightsTool, MeetingDetailsTool, MeetingIdParams, SummaryTool};
pub use list::{ListMeetingsParams, ListMeetingsTool, MeetingsTool};
pub use transcript::{TranscriptParams, TranscriptTool};
