//! Reporters: output formats for analysis reports.
//!
//! 3 formats: console, JSON, SARIF 2.1.0.

pub mod console;
pub mod json;
pub mod sarif;

use crate::engine::AnalysisReport;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &AnalysisReport) -> Result<String, String>;
}

/// Create a reporter by format name. `use_color` only affects the console.
pub fn create_reporter(format: &str, use_color: bool) -> Option<Box<dyn Reporter>> {
    match format {
        "sarif" => Some(Box::new(sarif::SarifReporter::new())),
        "json" => Some(Box::new(json::JsonReporter)),
        "console" => Some(Box::new(console::ConsoleReporter::new(use_color))),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["console", "json", "sarif"]
}
