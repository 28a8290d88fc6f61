//! Analysis host and end-to-end pipeline.

pub mod context;
pub mod host;
pub mod pipeline;
pub mod report;

pub use context::{AnalysisContext, DeclarationNode, NodeContext, ReportOptions, SyntaxKind};
pub use host::AnalysisHost;
pub use pipeline::AnalysisPipeline;
pub use report::{AnalysisReport, AnalyzerFailure};
