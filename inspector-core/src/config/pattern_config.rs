//! Pattern selection and severity configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical names of the detectable design patterns.
pub const KNOWN_PATTERNS: &[&str] = &["singleton", "factory_method", "decorator", "flyweight"];

/// Severity names accepted in `min_severity` and `severity_overrides`.
pub const KNOWN_SEVERITIES: &[&str] = &["error", "warning", "info", "hint"];

/// Configuration for which detectors run and how their findings are graded.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PatternConfig {
    /// Patterns to detect. Empty means all known patterns.
    #[serde(default)]
    pub enabled: Vec<String>,
    /// Findings below this severity are dropped from the report. Default: "hint".
    pub min_severity: Option<String>,
    /// Per-pattern severity overrides, keyed by pattern name.
    #[serde(default)]
    pub severity_overrides: BTreeMap<String, String>,
}

impl PatternConfig {
    /// Returns the effective list of enabled patterns, defaulting to all.
    pub fn effective_enabled(&self) -> Vec<String> {
        if self.enabled.is_empty() {
            KNOWN_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            self.enabled.iter().map(|p| normalize_pattern_name(p)).collect()
        }
    }

    pub fn is_enabled(&self, pattern: &str) -> bool {
        let pattern = normalize_pattern_name(pattern);
        self.effective_enabled().iter().any(|p| *p == pattern)
    }

    pub fn effective_min_severity(&self) -> &str {
        self.min_severity.as_deref().unwrap_or("hint")
    }

    /// Returns the configured severity override for `pattern`, if any.
    pub fn severity_override(&self, pattern: &str) -> Option<&str> {
        let pattern = normalize_pattern_name(pattern);
        self.severity_overrides
            .iter()
            .find(|(name, _)| normalize_pattern_name(name) == pattern)
            .map(|(_, severity)| severity.as_str())
    }
}

/// Lowercases a pattern name and folds `-` and spaces into `_`,
/// so "Factory-Method" and "factory method" both become "factory_method".
pub fn normalize_pattern_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_enabled_means_all_patterns() {
        let config = PatternConfig::default();
        assert_eq!(config.effective_enabled().len(), KNOWN_PATTERNS.len());
        assert!(config.is_enabled("flyweight"));
    }

    #[test]
    fn pattern_names_are_normalized() {
        let config = PatternConfig {
            enabled: vec!["Factory-Method".to_string()],
            ..Default::default()
        };
        assert!(config.is_enabled("factory_method"));
        assert!(config.is_enabled("factory method"));
        assert!(!config.is_enabled("singleton"));
    }
}
