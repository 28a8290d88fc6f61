//! Source discovery: which files make up the compilation.

pub mod language_detect;
pub mod types;
pub mod walker;

pub use language_detect::Language;
pub use types::{DiscoveredFile, ScanOutput, SkippedFile};
pub use walker::Scanner;
