//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, InspectorErrorCode};

/// Errors that can occur while parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar could not be loaded for language: {language}")]
    GrammarNotFound { language: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Unsupported language: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Source is not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },
}

impl InspectorErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
