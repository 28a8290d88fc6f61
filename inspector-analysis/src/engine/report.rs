//! Result of one detection pass.

use std::collections::BTreeMap;

use inspector_core::errors::DetectionError;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::patterns::DesignPattern;

/// A callback that panicked. The pass continued without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerFailure {
    pub pattern: DesignPattern,
    pub file: String,
    pub message: String,
}

impl From<&AnalyzerFailure> for DetectionError {
    fn from(failure: &AnalyzerFailure) -> Self {
        DetectionError::AnalyzerPanic {
            pattern: failure.pattern.name().to_string(),
            message: format!("{}: {}", failure.file, failure.message),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Sorted by file, line, column, rule id, check.
    pub diagnostics: Vec<Diagnostic>,
    pub patterns: Vec<DesignPattern>,
    pub files_analyzed: usize,
    /// Files whose tree contained syntax errors. They were still analyzed.
    pub files_with_syntax_errors: usize,
    pub declarations_visited: usize,
    pub cancelled: bool,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AnalyzerFailure>,
    /// Hash of the analyzed compilation.
    pub fingerprint: u64,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count_for(&self, pattern: DesignPattern) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.pattern == pattern)
            .count()
    }

    /// Diagnostic counts per pattern, enabled patterns with no findings included.
    pub fn counts_by_pattern(&self) -> BTreeMap<DesignPattern, usize> {
        let mut counts: BTreeMap<DesignPattern, usize> =
            self.patterns.iter().map(|pattern| (*pattern, 0)).collect();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.pattern).or_insert(0) += 1;
        }
        counts
    }

    /// Diagnostics for one pattern.
    pub fn for_pattern(&self, pattern: DesignPattern) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.pattern == pattern)
    }
}
