//! Diagnostic and severity types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parsers::types::Location;
use crate::patterns::DesignPattern;

/// Severity levels, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "hint" => Some(Self::Hint),
            _ => None,
        }
    }

    /// Whether a finding of this severity passes a `minimum` threshold.
    pub fn at_least(&self, minimum: Severity) -> bool {
        *self <= minimum
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// One reported pattern occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable rule id, e.g. `SingletonPatternAnalyzer`.
    pub rule_id: String,
    pub pattern: DesignPattern,
    /// The check or verdict that fired.
    pub check: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Diagnostic {
    /// Ordering key: file, line, column, rule id, check.
    pub fn sort_key(&self) -> (&str, u32, u32, &str, &str) {
        (
            &self.location.file,
            self.location.range.start.line,
            self.location.range.start.column,
            &self.rule_id,
            &self.check,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} [{}/{}]",
            self.location, self.severity, self.message, self.rule_id, self.check
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_threshold() {
        assert!(Severity::Error.at_least(Severity::Info));
        assert!(Severity::Info.at_least(Severity::Info));
        assert!(!Severity::Hint.at_least(Severity::Info));
        assert_eq!(Severity::from_name(" Warning "), Some(Severity::Warning));
        assert_eq!(Severity::from_name("fatal"), None);
    }
}
