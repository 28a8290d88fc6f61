//! InspectorErrorCode trait for structured error reporting.

/// Trait for attaching a stable error code to Inspector errors.
/// Every error enum implements this so reporters and callers can match on
/// a code string instead of a message.
pub trait InspectorErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn diagnostic_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const UNKNOWN_PATTERN: &str = "UNKNOWN_PATTERN";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
