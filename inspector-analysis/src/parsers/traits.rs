//! LanguageParser trait: the contract a source front end implements.

use std::path::Path;

use inspector_core::errors::ParseError;

use crate::scanner::language_detect::Language;
use crate::syntax::SourceTree;

/// Turns source bytes into a `SourceTree` of the declaration model.
pub trait LanguageParser: Send + Sync {
    fn language(&self) -> Language;

    fn extensions(&self) -> &[&str];

    /// Parse source code and lower it. Syntax errors are recorded on the
    /// tree, not returned; `Err` means no tree could be produced at all.
    fn parse(&self, source: &[u8], path: &Path) -> Result<SourceTree, ParseError>;
}
