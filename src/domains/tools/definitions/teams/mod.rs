//! Team tools.

pub mod meetings;

pub use meetings::{TeamMeetingsParams, TeamMeetingsTool};
