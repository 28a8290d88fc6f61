//! Scanner output types.

use std::path::PathBuf;

use inspector_core::errors::ScanError;

use super::language_detect::Language;

/// A source file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated. Used in diagnostics.
    pub relative: String,
    pub size: u64,
    pub language: Language,
}

/// A source file left out of the compilation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub size: u64,
    pub max: u64,
}

#[derive(Debug, Default)]
pub struct ScanOutput {
    /// Selected files, sorted by relative path.
    pub files: Vec<DiscoveredFile>,
    pub skipped: Vec<SkippedFile>,
    /// Walk errors for entries that could not be read.
    pub errors: Vec<ScanError>,
    pub cancelled: bool,
}

impl ScanOutput {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|file| file.size).sum()
    }
}
