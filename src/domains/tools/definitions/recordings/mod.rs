//! Recording tools.

pub mod upload;

pub use upload::{UploadRecordingParams, UploadRecordingTool};
