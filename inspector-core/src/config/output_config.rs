//! Report output configuration.

use serde::{Deserialize, Serialize};

/// Report formats the analysis crate can render.
pub const KNOWN_FORMATS: &[&str] = &["console", "json", "sarif"];

/// Configuration for rendering analysis reports.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format. Default: "console".
    pub format: Option<String>,
    /// Report statement-level signals (a local initialized from a factory
    /// method, a wrapping construction chain). Default: true.
    pub include_partial: Option<bool>,
    /// Emit ANSI colors in console output. Default: false.
    pub color: Option<bool>,
}

impl OutputConfig {
    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or("console")
    }

    pub fn effective_include_partial(&self) -> bool {
        self.include_partial.unwrap_or(true)
    }

    pub fn effective_color(&self) -> bool {
        self.color.unwrap_or(false)
    }
}
