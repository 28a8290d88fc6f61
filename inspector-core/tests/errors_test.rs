//! Tests for the Inspector error taxonomy.

use std::path::PathBuf;

use inspector_core::errors::error_code;
use inspector_core::errors::*;

#[test]
fn test_subsystem_codes() {
    let scan = ScanError::RootNotFound {
        path: PathBuf::from("/missing"),
    };
    assert_eq!(scan.error_code(), error_code::SCAN_ERROR);
    assert_eq!(ScanError::Cancelled.error_code(), error_code::CANCELLED);

    let parse = ParseError::UnsupportedLanguage {
        extension: "vb".to_string(),
    };
    assert_eq!(parse.error_code(), error_code::UNSUPPORTED_LANGUAGE);

    let detection = DetectionError::UnknownPattern("observer".to_string());
    assert_eq!(detection.error_code(), error_code::UNKNOWN_PATTERN);
    assert_eq!(
        DetectionError::NoAnalyzersEnabled.error_code(),
        error_code::DETECTION_ERROR
    );
}

#[test]
fn test_pipeline_error_forwards_codes() {
    let err: PipelineError = ConfigError::FileNotFound {
        path: "inspector.toml".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);

    let err: PipelineError = ScanError::Cancelled.into();
    assert_eq!(err.error_code(), error_code::CANCELLED);
    assert_eq!(PipelineError::Cancelled.error_code(), error_code::CANCELLED);
}

#[test]
fn test_diagnostic_string_format() {
    let err = ParseError::TreeSitterError {
        path: PathBuf::from("Singleton.cs"),
        message: "no tree".to_string(),
    };
    let rendered = err.diagnostic_string();
    assert!(rendered.starts_with("[PARSE_ERROR] "));
    assert!(rendered.contains("Singleton.cs"));
}

#[test]
fn test_pipeline_result_accumulates() {
    let mut result: PipelineResult<Vec<String>> = PipelineResult::new(vec!["a".to_string()]);
    assert!(result.is_clean());

    result.add_error(PipelineError::Parse(ParseError::InvalidUtf8 {
        path: PathBuf::from("Bad.cs"),
    }));
    result.add_error(PipelineError::Cancelled);

    assert!(!result.is_clean());
    assert_eq!(result.error_count(), 2);
    assert_eq!(result.data.len(), 1);
}
