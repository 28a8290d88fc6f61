//! Scan → parse → compilation → detection, with non-fatal error collection.

use std::fs;
use std::path::Path;

use inspector_core::config::InspectorConfig;
use inspector_core::errors::{DetectionError, PipelineError, PipelineResult, ScanError};
use inspector_core::traits::{Cancellable, CancellationToken};
use rayon::prelude::*;

use super::host::AnalysisHost;
use super::report::AnalysisReport;
use crate::compilation::CompilationView;
use crate::parsers::{CSharpParser, LanguageParser};
use crate::reporters::create_reporter;
use crate::scanner::{DiscoveredFile, Scanner};
use crate::syntax::SourceTree;

pub struct AnalysisPipeline {
    config: InspectorConfig,
    cancel: CancellationToken,
}

impl AnalysisPipeline {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `token` instead of the pipeline's own, so a caller can cancel.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Analyzes every C# file under `root`.
    ///
    /// Invalid configuration and a missing root are fatal. Unreadable,
    /// oversized, or unparsable files are collected as non-fatal errors
    /// and left out of the compilation.
    pub fn run(&self, root: &Path) -> Result<PipelineResult<AnalysisReport>, PipelineError> {
        InspectorConfig::validate(&self.config)?;
        let host = AnalysisHost::from_config(&self.config)?;
        let mut result = PipelineResult::<AnalysisReport>::default();

        let scan = Scanner::new(self.config.scan.clone()).scan(root, &self.cancel)?;
        for error in scan.errors {
            result.add_error(error.into());
        }
        for skipped in scan.skipped {
            result.add_error(
                ScanError::MaxFileSizeExceeded {
                    path: skipped.path,
                    size: skipped.size,
                    max: skipped.max,
                }
                .into(),
            );
        }
        if scan.cancelled {
            result.data.cancelled = true;
            return Ok(result);
        }

        let parsed: Vec<Result<Option<SourceTree>, PipelineError>> =
            host.install(|| scan.files.par_iter().map(|file| self.parse_file(file)).collect());
        let mut trees = Vec::with_capacity(parsed.len());
        for outcome in parsed {
            match outcome {
                Ok(Some(tree)) => trees.push(tree),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(error = %error, "skipping file");
                    result.add_error(error);
                }
            }
        }
        if self.cancel.is_cancelled() {
            result.data.cancelled = true;
            return Ok(result);
        }

        let view = if self.config.analysis.effective_semantic_model() {
            CompilationView::new(trees)
        } else {
            CompilationView::without_semantics(trees)
        };
        let report = host.run(&view, &self.cancel);
        for failure in &report.failures {
            result.add_error(DetectionError::from(failure).into());
        }
        result.data = report;
        Ok(result)
    }

    /// `Ok(None)` when cancelled before the file was read.
    fn parse_file(&self, file: &DiscoveredFile) -> Result<Option<SourceTree>, PipelineError> {
        if self.cancel.is_cancelled() {
            return Ok(None);
        }
        let source = fs::read(&file.path).map_err(|source| ScanError::IoError {
            path: file.path.clone(),
            source,
        })?;
        let tree = CSharpParser::new().parse(&source, Path::new(&file.relative))?;
        Ok(Some(tree))
    }

    /// Renders `report` in the configured output format.
    pub fn render(&self, report: &AnalysisReport) -> Result<String, PipelineError> {
        let format = self.config.output.effective_format();
        let reporter = create_reporter(format, self.config.output.effective_color())
            .ok_or_else(|| PipelineError::Report(format!("unknown format: {format}")))?;
        reporter.generate(report).map_err(PipelineError::Report)
    }
}
