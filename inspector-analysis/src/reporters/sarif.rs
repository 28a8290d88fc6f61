//! SARIF 2.1.0 reporter.

use serde_json::{json, Value};

use super::Reporter;
use crate::diagnostics::{descriptor_for, Diagnostic, Severity};
use crate::engine::AnalysisReport;

/// SARIF 2.1.0 reporter.
pub struct SarifReporter {
    pub tool_name: String,
    pub tool_version: String,
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SarifReporter {
    pub fn new() -> Self {
        Self {
            tool_name: "inspector".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn severity_to_sarif_level(severity: &Severity) -> &'static str {
        match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "note",
            Severity::Hint => "note",
        }
    }

    fn build_result(&self, diagnostic: &Diagnostic) -> Value {
        let range = &diagnostic.location.range;
        let mut result = json!({
            "ruleId": diagnostic.rule_id,
            "level": Self::severity_to_sarif_level(&diagnostic.severity),
            "message": {
                "text": diagnostic.message
            },
            "locations": [{
                "physicalLocation": {
                    "artifactLocation": {
                        "uri": diagnostic.location.file,
                        "uriBaseId": "%SRCROOT%"
                    },
                    "region": {
                        "startLine": range.start.line + 1,
                        "startColumn": range.start.column + 1,
                        "endLine": range.end.line + 1,
                        "endColumn": range.end.column + 1
                    }
                }
            }]
        });

        let mut properties = serde_json::Map::new();
        properties.insert("check".to_string(), json!(diagnostic.check));
        properties.insert("pattern".to_string(), json!(diagnostic.pattern.name()));
        if let Some(ref evidence) = diagnostic.evidence {
            properties.insert("evidence".to_string(), json!(evidence));
        }
        result["properties"] = Value::Object(properties);
        result
    }

    fn build_rules(&self, report: &AnalysisReport) -> Vec<Value> {
        report
            .patterns
            .iter()
            .map(|pattern| {
                let descriptor = descriptor_for(*pattern);
                json!({
                    "id": descriptor.id,
                    "name": descriptor.title,
                    "shortDescription": {
                        "text": descriptor.title
                    },
                    "defaultConfiguration": {
                        "level": Self::severity_to_sarif_level(&descriptor.default_severity)
                    },
                    "properties": {
                        "category": descriptor.category
                    }
                })
            })
            .collect()
    }
}

impl Reporter for SarifReporter {
    fn name(&self) -> &'static str {
        "sarif"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, String> {
        let results: Vec<Value> = report
            .diagnostics
            .iter()
            .map(|diagnostic| self.build_result(diagnostic))
            .collect();

        let sarif = json!({
            "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": self.tool_name,
                        "version": self.tool_version,
                        "rules": self.build_rules(report)
                    }
                },
                "results": results,
                "invocations": [{
                    "executionSuccessful": !report.cancelled && report.failures.is_empty()
                }]
            }]
        });

        serde_json::to_string_pretty(&sarif).map_err(|e| e.to_string())
    }
}
