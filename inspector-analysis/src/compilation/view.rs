//! CompilationView: the read-only, shareable set of trees in one analysis unit.

use std::path::Path;
use std::sync::Arc;

use inspector_core::errors::ParseError;
use xxhash_rust::xxh3::xxh3_64;

use super::index::{DeclarationIndex, MethodId, TypeId};
use super::semantics::{DeclaredTypeSemantics, SemanticModel};
use crate::parsers::{CSharpParser, LanguageParser};
use crate::syntax::{MemberDeclaration, MethodDeclaration, SourceTree, TypeDeclaration};

/// All source trees of the current compilation plus name indexes and an
/// optional semantic model. Immutable after construction, so it can be
/// shared by reference across concurrent checks.
pub struct CompilationView {
    trees: Vec<SourceTree>,
    index: DeclarationIndex,
    semantics: Option<Arc<dyn SemanticModel>>,
}

impl CompilationView {
    /// Builds a view with the default name-based semantic model.
    pub fn new(trees: Vec<SourceTree>) -> Self {
        let semantics: Arc<dyn SemanticModel> = Arc::new(DeclaredTypeSemantics::from_trees(&trees));
        Self::with_semantics(trees, Some(semantics))
    }

    /// Builds a view with no semantic information at all.
    pub fn without_semantics(trees: Vec<SourceTree>) -> Self {
        Self::with_semantics(trees, None)
    }

    pub fn with_semantics(trees: Vec<SourceTree>, semantics: Option<Arc<dyn SemanticModel>>) -> Self {
        let index = DeclarationIndex::build(&trees);
        Self {
            trees,
            index,
            semantics,
        }
    }

    /// Parses `(file name, source text)` pairs into a view.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let parser = CSharpParser::new();
        let trees = sources
            .into_iter()
            .map(|(file, text)| parser.parse(text.as_bytes(), Path::new(file)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(trees))
    }

    pub fn trees(&self) -> &[SourceTree] {
        &self.trees
    }

    pub fn semantics(&self) -> Option<&dyn SemanticModel> {
        self.semantics.as_deref()
    }

    /// Every type declaration in the compilation, tree by tree.
    pub fn types(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.trees.iter().flat_map(|tree| tree.types.iter())
    }

    pub fn type_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.types.len()).sum()
    }

    pub fn method_count(&self) -> usize {
        self.index.method_count()
    }

    pub fn type_at(&self, id: TypeId) -> Option<&TypeDeclaration> {
        self.trees.get(id.tree as usize)?.types.get(id.ty as usize)
    }

    pub fn method_at(&self, id: MethodId) -> Option<&MethodDeclaration> {
        match self.type_at(id.owner)?.members.get(id.member as usize)? {
            MemberDeclaration::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Type declarations whose identifier is `name`.
    pub fn types_named<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s TypeDeclaration> + 's {
        let ids = self.index.types_named(name);
        ids.iter().filter_map(move |id| self.type_at(*id))
    }

    /// Type declarations that list `name` in their base list.
    pub fn types_with_base<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s TypeDeclaration> + 's {
        let ids = self.index.types_with_base(name);
        ids.iter().filter_map(move |id| self.type_at(*id))
    }

    pub fn methods_named<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s MethodDeclaration> + 's {
        let ids = self.index.methods_named(name);
        ids.iter().filter_map(move |id| self.method_at(*id))
    }

    /// Methods whose return type identifier is `name`.
    pub fn methods_returning<'s>(
        &'s self,
        name: &str,
    ) -> impl Iterator<Item = &'s MethodDeclaration> + 's {
        let ids = self.index.methods_returning(name);
        ids.iter().filter_map(move |id| self.method_at(*id))
    }

    /// Stable hash of the compilation's contents, independent of tree order.
    pub fn fingerprint(&self) -> u64 {
        let mut hashes: Vec<(&str, u64)> = self
            .trees
            .iter()
            .map(|tree| (tree.path.as_str(), tree.content_hash))
            .collect();
        hashes.sort_unstable();
        let mut bytes = Vec::with_capacity(hashes.len() * 8);
        for (path, hash) in hashes {
            bytes.extend_from_slice(path.as_bytes());
            bytes.extend_from_slice(&hash.to_le_bytes());
        }
        xxh3_64(&bytes)
    }
}

impl std::fmt::Debug for CompilationView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationView")
            .field("trees", &self.trees.len())
            .field("types", &self.type_count())
            .field("methods", &self.method_count())
            .field("semantics", &self.semantics.is_some())
            .finish()
    }
}
