//! Gitignore-aware walker built on `ignore::WalkBuilder`.

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use inspector_core::config::ScanConfig;
use inspector_core::errors::ScanError;
use inspector_core::traits::{Cancellable, CancellationToken};

use super::language_detect::Language;
use super::types::{DiscoveredFile, ScanOutput, SkippedFile};

/// Build output directories that never hold hand-written sources.
const DEFAULT_EXCLUDES: &[&str] = &["!**/bin/**", "!**/obj/**", "!**/.git/**", "!**/.vs/**"];

pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walks `root` and returns the C# files to analyze.
    ///
    /// A cancelled walk returns what it found so far with `cancelled` set.
    pub fn scan(&self, root: &Path, cancel: &CancellationToken) -> Result<ScanOutput, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let max = self.config.effective_max_file_size();
        let mut output = ScanOutput::default();

        for entry in self.build_walker(root)? {
            if cancel.is_cancelled() {
                output.cancelled = true;
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    output.errors.push(ScanError::IoError {
                        path: root.to_path_buf(),
                        source: std::io::Error::other(e.to_string()),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            let Some(language) = Language::from_extension(path.extension().and_then(|ext| ext.to_str()))
            else {
                continue;
            };

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    output.errors.push(ScanError::IoError {
                        path: path.to_path_buf(),
                        source: std::io::Error::other(e.to_string()),
                    });
                    continue;
                }
            };
            if size > max {
                tracing::warn!(path = %path.display(), size, max, "skipping oversized file");
                output.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    size,
                    max,
                });
                continue;
            }

            output.files.push(DiscoveredFile {
                relative: relative_path(root, path),
                path: path.to_path_buf(),
                size,
                language,
            });
        }

        output.files.sort_by(|a, b| a.relative.cmp(&b.relative));
        tracing::debug!(
            files = output.files.len(),
            skipped = output.skipped.len(),
            "scan complete"
        );
        Ok(output)
    }

    fn build_walker(&self, root: &Path) -> Result<ignore::Walk, ScanError> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(!self.config.effective_include_hidden())
            .follow_links(self.config.effective_follow_symlinks())
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut overrides = OverrideBuilder::new(root);
        for pattern in DEFAULT_EXCLUDES {
            overrides
                .add(pattern)
                .map_err(|e| invalid_pattern(pattern, e))?;
        }
        for pattern in &self.config.extra_ignore {
            let negated = if pattern.starts_with('!') {
                pattern.clone()
            } else {
                format!("!{pattern}")
            };
            overrides
                .add(&negated)
                .map_err(|e| invalid_pattern(pattern, e))?;
        }
        let overrides = overrides
            .build()
            .map_err(|e| invalid_pattern("<overrides>", e))?;
        builder.overrides(overrides);

        Ok(builder.build())
    }
}

fn invalid_pattern(pattern: &str, error: ignore::Error) -> ScanError {
    ScanError::InvalidIgnorePattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
