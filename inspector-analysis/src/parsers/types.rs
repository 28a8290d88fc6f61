//! Source positions shared by the parser, the declaration model, and reporters.

use serde::{Deserialize, Serialize};

/// Zero-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn from_ts_node(node: &tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start: Position {
                line: start.row as u32,
                column: start.column as u32,
            },
            end: Position {
                line: end.row as u32,
                column: end.column as u32,
            },
        }
    }
}

/// A span inside a named source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Location {
    pub file: String,
    pub range: Range,
}

impl Location {
    pub fn new(file: impl Into<String>, range: Range) -> Self {
        Self {
            file: file.into(),
            range,
        }
    }

    /// One-based `file:line:column`, the form editors and terminals link.
    pub fn display_short(&self) -> String {
        format!(
            "{}:{}:{}",
            self.file,
            self.range.start.line + 1,
            self.range.start.column + 1
        )
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_short())
    }
}
