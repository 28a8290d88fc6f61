//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Upper bound accepted for `analysis.threads`.
pub const MAX_THREADS: usize = 1024;

/// Configuration for the detection pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dispatch declaration callbacks on the rayon pool. Default: true.
    pub parallel: Option<bool>,
    /// Worker threads for parsing and detection. 0 = rayon default.
    pub threads: Option<usize>,
    /// Build the name-based semantic model for the compilation. Default: true.
    /// Without it, collection-resolving checks report `Unsupported`.
    pub semantic_model: Option<bool>,
}

impl AnalysisConfig {
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    /// Returns the effective thread count, defaulting to 0 (rayon decides).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_semantic_model(&self) -> bool {
        self.semantic_model.unwrap_or(true)
    }
}
