//! One parsed source file in declaration-model form.

use serde::{Deserialize, Serialize};

use super::declarations::TypeDeclaration;
use crate::parsers::types::Range;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTree {
    pub path: String,
    pub content_hash: u64,
    /// ERROR and MISSING nodes in the concrete tree. Lowering still ran.
    pub error_count: u32,
    pub error_ranges: Vec<Range>,
    /// Every type declared in the file, nested ones included, in source order.
    pub types: Vec<TypeDeclaration>,
}

impl SourceTree {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
