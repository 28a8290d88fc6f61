//! Configuration system for Inspector.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod inspector_config;
pub mod output_config;
pub mod pattern_config;
pub mod scan_config;

pub use analysis_config::AnalysisConfig;
pub use inspector_config::{CliOverrides, InspectorConfig};
pub use output_config::OutputConfig;
pub use pattern_config::PatternConfig;
pub use scan_config::ScanConfig;
