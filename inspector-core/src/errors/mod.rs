//! Error handling for Inspector.
//! One error enum per subsystem, `thiserror` only.
//!
//! Pattern checks never produce these: a failed check is a value
//! (`NoMatch` or `Unsupported`), not an error. These enums cover the
//! host-level plumbing around detection.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::InspectorErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use scan_error::ScanError;
