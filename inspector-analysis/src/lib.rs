//! # inspector-analysis
//!
//! Static structural detection of four classic design patterns in C# code:
//! Singleton, Factory Method, Decorator, and Flyweight.
//!
//! Layers, leaves first:
//! - `parsers` / `syntax`: tree-sitter C# front end lowered into an owned declaration model
//! - `compilation`: the cross-file view, name indexes, and the semantic model
//! - `patterns`: single-purpose checks, `MatchResult`, and the strategy dispatcher
//! - `detectors`: per-pattern orchestrators that register for declaration kinds
//! - `engine`: the analysis host and the scan → parse → detect pipeline
//! - `diagnostics` / `reporters`: findings and their console, JSON, and SARIF renderings

pub mod compilation;
pub mod detectors;
pub mod diagnostics;
pub mod engine;
pub mod parsers;
pub mod patterns;
pub mod reporters;
pub mod scanner;
pub mod syntax;

pub use compilation::CompilationView;
pub use diagnostics::{Diagnostic, Severity};
pub use engine::{AnalysisHost, AnalysisPipeline, AnalysisReport};
pub use patterns::{DesignPattern, MatchResult, Verdict};
