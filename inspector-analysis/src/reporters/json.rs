//! JSON reporter: structured JSON output.

use serde_json::json;

use super::Reporter;
use crate::engine::AnalysisReport;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, String> {
        let diagnostics: Vec<serde_json::Value> = report
            .diagnostics
            .iter()
            .map(|d| {
                json!({
                    "rule_id": d.rule_id,
                    "pattern": d.pattern.name(),
                    "check": d.check,
                    "severity": d.severity.to_string(),
                    "message": d.message,
                    "file": d.location.file,
                    "line": d.location.range.start.line + 1,
                    "column": d.location.range.start.column + 1,
                    "end_line": d.location.range.end.line + 1,
                    "end_column": d.location.range.end.column + 1,
                    "evidence": d.evidence,
                })
            })
            .collect();

        let counts: serde_json::Map<String, serde_json::Value> = report
            .counts_by_pattern()
            .into_iter()
            .map(|(pattern, count)| (pattern.name().to_string(), json!(count)))
            .collect();

        let output = json!({
            "files_analyzed": report.files_analyzed,
            "files_with_syntax_errors": report.files_with_syntax_errors,
            "declarations_visited": report.declarations_visited,
            "cancelled": report.cancelled,
            "duration_ms": report.duration_ms,
            "fingerprint": format!("{:016x}", report.fingerprint),
            "counts": counts,
            "diagnostic_count": report.diagnostics.len(),
            "diagnostics": diagnostics,
            "failures": report.failures,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
