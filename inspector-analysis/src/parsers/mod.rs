//! Tree-sitter parser subsystem: thread-local C# parser, error-tolerant lowering.

pub mod csharp;
pub mod error_tolerant;
pub mod traits;
pub mod types;

pub use csharp::CSharpParser;
pub use traits::LanguageParser;
pub use types::{Location, Position, Range};
