//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for source discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Larger files are skipped. Default: 1 MiB.
    pub max_file_size: Option<u64>,
    /// Additional gitignore-style patterns to exclude.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Descend into hidden files and directories. Default: false.
    pub include_hidden: Option<bool>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_include_hidden(&self) -> bool {
        self.include_hidden.unwrap_or(false)
    }
}
