//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, InspectorErrorCode};

/// Errors that can occur while discovering and reading source files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scan root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Invalid ignore pattern {pattern}: {message}")]
    InvalidIgnorePattern { pattern: String, message: String },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("File too large: {path} ({size} bytes, max {max})")]
    MaxFileSizeExceeded { path: PathBuf, size: u64, max: u64 },
}

impl InspectorErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::SCAN_ERROR,
        }
    }
}
