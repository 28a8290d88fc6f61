//! Top-level Inspector configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::analysis_config::MAX_THREADS;
use super::output_config::KNOWN_FORMATS;
use super::pattern_config::{normalize_pattern_name, KNOWN_PATTERNS, KNOWN_SEVERITIES};
use super::{AnalysisConfig, OutputConfig, PatternConfig, ScanConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "inspector.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`INSPECTOR_*`)
/// 3. Project config (`inspector.toml` in project root)
/// 4. User config (`~/.inspector/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InspectorConfig {
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
    pub patterns: PatternConfig,
    pub output: OutputConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_max_file_size: Option<u64>,
    pub analysis_threads: Option<usize>,
    pub analysis_parallel: Option<bool>,
    pub patterns_enabled: Option<Vec<String>>,
    pub output_format: Option<String>,
}

impl InspectorConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &InspectorConfig) -> Result<(), ConfigError> {
        for pattern in &config.patterns.enabled {
            let normalized = normalize_pattern_name(pattern);
            if !KNOWN_PATTERNS.contains(&normalized.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.enabled".to_string(),
                    message: format!("unknown pattern '{pattern}'"),
                });
            }
        }
        for (pattern, severity) in &config.patterns.severity_overrides {
            let normalized = normalize_pattern_name(pattern);
            if !KNOWN_PATTERNS.contains(&normalized.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.severity_overrides".to_string(),
                    message: format!("unknown pattern '{pattern}'"),
                });
            }
            if !KNOWN_SEVERITIES.contains(&severity.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("patterns.severity_overrides.{pattern}"),
                    message: format!("unknown severity '{severity}'"),
                });
            }
        }
        if let Some(ref severity) = config.patterns.min_severity {
            if !KNOWN_SEVERITIES.contains(&severity.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.min_severity".to_string(),
                    message: format!("unknown severity '{severity}'"),
                });
            }
        }
        if let Some(ref format) = config.output.format {
            if !KNOWN_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "output.format".to_string(),
                    message: format!("must be one of {}", KNOWN_FORMATS.join(", ")),
                });
            }
        }
        if let Some(threads) = config.analysis.threads {
            if threads > MAX_THREADS {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.threads".to_string(),
                    message: format!("must be at most {MAX_THREADS}"),
                });
            }
        }
        if let Some(max_file_size) = config.scan.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.inspector/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut InspectorConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: InspectorConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value or a non-empty collection.
    fn merge(base: &mut InspectorConfig, other: &InspectorConfig) {
        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.include_hidden.is_some() {
            base.scan.include_hidden = other.scan.include_hidden;
        }

        // Analysis
        if other.analysis.parallel.is_some() {
            base.analysis.parallel = other.analysis.parallel;
        }
        if other.analysis.threads.is_some() {
            base.analysis.threads = other.analysis.threads;
        }
        if other.analysis.semantic_model.is_some() {
            base.analysis.semantic_model = other.analysis.semantic_model;
        }

        // Patterns
        if !other.patterns.enabled.is_empty() {
            base.patterns.enabled = other.patterns.enabled.clone();
        }
        if other.patterns.min_severity.is_some() {
            base.patterns.min_severity = other.patterns.min_severity.clone();
        }
        for (pattern, severity) in &other.patterns.severity_overrides {
            base.patterns
                .severity_overrides
                .insert(pattern.clone(), severity.clone());
        }

        // Output
        if other.output.format.is_some() {
            base.output.format = other.output.format.clone();
        }
        if other.output.include_partial.is_some() {
            base.output.include_partial = other.output.include_partial;
        }
        if other.output.color.is_some() {
            base.output.color = other.output.color;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `INSPECTOR_SCAN_MAX_FILE_SIZE`, `INSPECTOR_ANALYSIS_THREADS`, etc.
    fn apply_env_overrides(config: &mut InspectorConfig) {
        if let Ok(val) = std::env::var("INSPECTOR_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INSPECTOR_ANALYSIS_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INSPECTOR_ANALYSIS_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INSPECTOR_PATTERNS_ENABLED") {
            let patterns: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if !patterns.is_empty() {
                config.patterns.enabled = patterns;
            }
        }
        if let Ok(val) = std::env::var("INSPECTOR_OUTPUT_FORMAT") {
            config.output.format = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut InspectorConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = cli.analysis_threads {
            config.analysis.threads = Some(v);
        }
        if let Some(v) = cli.analysis_parallel {
            config.analysis.parallel = Some(v);
        }
        if let Some(ref v) = cli.patterns_enabled {
            config.patterns.enabled = v.clone();
        }
        if let Some(ref v) = cli.output_format {
            config.output.format = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.inspector/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".inspector"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
