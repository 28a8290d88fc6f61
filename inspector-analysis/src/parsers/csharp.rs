//! C# parser.

use std::cell::RefCell;
use std::path::Path;

use inspector_core::errors::ParseError;
use tree_sitter::Parser;
use xxhash_rust::xxh3::xxh3_64;

use super::error_tolerant::count_errors;
use super::traits::LanguageParser;
use crate::scanner::language_detect::Language;
use crate::syntax::lowering::CSharpLowering;
use crate::syntax::SourceTree;

thread_local! {
    static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

pub struct CSharpParser;

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CSharpParser {
    pub fn new() -> Self {
        Self
    }

    /// Convenience for in-memory snippets; `file` becomes the tree's path.
    pub fn parse_str(&self, source: &str, file: &str) -> Result<SourceTree, ParseError> {
        self.parse(source.as_bytes(), Path::new(file))
    }
}

fn new_parser() -> Result<Parser, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| ParseError::GrammarNotFound {
            language: format!("csharp ({e})"),
        })?;
    Ok(parser)
}

impl LanguageParser for CSharpParser {
    fn language(&self) -> Language {
        Language::CSharp
    }

    fn extensions(&self) -> &[&str] {
        Language::CSharp.extensions()
    }

    fn parse(&self, source: &[u8], path: &Path) -> Result<SourceTree, ParseError> {
        let tree = PARSER.with(|cell| -> Result<tree_sitter::Tree, ParseError> {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                *slot = Some(new_parser()?);
            }
            let Some(parser) = slot.as_mut() else {
                return Err(ParseError::GrammarNotFound {
                    language: Language::CSharp.name().to_string(),
                });
            };
            parser.parse(source, None).ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "parser produced no tree".to_string(),
            })
        })?;

        let root = tree.root_node();
        let (error_count, error_ranges) = count_errors(root);
        let file = path.to_string_lossy();
        let types = CSharpLowering::new(source, &file).lower_compilation_unit(root);

        if error_count > 0 {
            tracing::debug!(file = %file, error_count, "lowered C# tree with syntax errors");
        }

        Ok(SourceTree {
            path: file.into_owned(),
            content_hash: xxh3_64(source),
            error_count,
            error_ranges,
            types,
        })
    }
}
