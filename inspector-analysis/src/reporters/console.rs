//! Console reporter: human-readable output with optional color codes.

use super::Reporter;
use crate::diagnostics::Severity;
use crate::engine::AnalysisReport;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, severity: &Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",   // red
            Severity::Warning => "\x1b[33m", // yellow
            Severity::Info => "\x1b[36m",    // cyan
            Severity::Hint => "\x1b[90m",    // gray
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, String> {
        let mut output = String::new();

        for diagnostic in &report.diagnostics {
            let cs = self.color_start(&diagnostic.severity);
            let ce = self.color_end();
            output.push_str(&format!(
                "{}: {}{}{}: {} [{}/{}]\n",
                diagnostic.location.display_short(),
                cs,
                diagnostic.severity,
                ce,
                diagnostic.message,
                diagnostic.rule_id,
                diagnostic.check,
            ));
            if let Some(evidence) = &diagnostic.evidence {
                output.push_str(&format!("    evidence: {evidence}\n"));
            }
        }

        if !report.diagnostics.is_empty() {
            output.push('\n');
        }

        let counts = report
            .counts_by_pattern()
            .into_iter()
            .map(|(pattern, count)| format!("{}: {count}", pattern.display_name()))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "─── {} files, {} declarations, {} findings ({}) in {} ms ───\n",
            report.files_analyzed,
            report.declarations_visited,
            report.diagnostics.len(),
            counts,
            report.duration_ms,
        ));
        if report.files_with_syntax_errors > 0 {
            output.push_str(&format!(
                "{} file(s) contained syntax errors and were analyzed partially\n",
                report.files_with_syntax_errors
            ));
        }
        for failure in &report.failures {
            output.push_str(&format!(
                "analyzer {} failed on {}: {}\n",
                failure.pattern.name(),
                failure.file,
                failure.message
            ));
        }
        if report.cancelled {
            output.push_str("Analysis cancelled: results are incomplete\n");
        }

        Ok(output)
    }
}
