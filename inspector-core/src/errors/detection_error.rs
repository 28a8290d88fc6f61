//! Detection errors.
//!
//! Individual checks absorb their own failures. These variants describe
//! problems with the detection pass itself.

use super::error_code::{self, InspectorErrorCode};

/// Errors that can occur while setting up or running a detection pass.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Unknown design pattern: {0}")]
    UnknownPattern(String),

    #[error("No pattern analyzers enabled")]
    NoAnalyzersEnabled,

    #[error("Analyzer {pattern} panicked: {message}")]
    AnalyzerPanic { pattern: String, message: String },

    #[error("Thread pool setup failed: {0}")]
    ThreadPool(String),
}

impl InspectorErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPattern(_) => error_code::UNKNOWN_PATTERN,
            _ => error_code::DETECTION_ERROR,
        }
    }
}
