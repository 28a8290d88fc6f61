//! Analyzer trait.

use crate::engine::context::AnalysisContext;
use crate::patterns::DesignPattern;

/// A pattern orchestrator. Implementations hold no per-run state: every
/// fact a callback needs comes from its `NodeContext`.
pub trait PatternAnalyzer: Send + Sync {
    fn pattern(&self) -> DesignPattern;

    /// Registers callbacks for the declaration kinds this analyzer inspects.
    fn initialize(&self, context: &mut AnalysisContext);
}
