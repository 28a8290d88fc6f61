//! Findings and where they go.

pub mod descriptors;
pub mod sink;
pub mod types;

pub use descriptors::{descriptor_for, DiagnosticDescriptor};
pub use sink::{DiagnosticBag, DiagnosticSink};
pub use types::{Diagnostic, Severity};
