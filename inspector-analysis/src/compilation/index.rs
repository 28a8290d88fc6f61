//! Name indexes over a compilation's declarations.
//!
//! Keys are simple identifiers only. Two unrelated types with the same
//! name in different namespaces share an entry.

use rustc_hash::FxHashMap;

use crate::syntax::{MemberDeclaration, SourceTree};

/// Position of a type declaration: (tree, type) indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId {
    pub tree: u32,
    pub ty: u32,
}

/// Position of a method: its type plus the member index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    pub owner: TypeId,
    pub member: u32,
}

#[derive(Debug, Default)]
pub struct DeclarationIndex {
    types_by_name: FxHashMap<String, Vec<TypeId>>,
    types_by_base: FxHashMap<String, Vec<TypeId>>,
    methods_by_name: FxHashMap<String, Vec<MethodId>>,
    methods_by_return: FxHashMap<String, Vec<MethodId>>,
    method_count: usize,
}

impl DeclarationIndex {
    pub fn build(trees: &[SourceTree]) -> Self {
        let mut index = Self::default();
        for (tree_idx, tree) in trees.iter().enumerate() {
            for (type_idx, ty) in tree.types.iter().enumerate() {
                let type_id = TypeId {
                    tree: tree_idx as u32,
                    ty: type_idx as u32,
                };
                index
                    .types_by_name
                    .entry(ty.identifier.clone())
                    .or_default()
                    .push(type_id);
                for base in ty.base_identifiers() {
                    index
                        .types_by_base
                        .entry(base.to_string())
                        .or_default()
                        .push(type_id);
                }
                for (member_idx, member) in ty.members.iter().enumerate() {
                    let MemberDeclaration::Method(method) = member else {
                        continue;
                    };
                    let method_id = MethodId {
                        owner: type_id,
                        member: member_idx as u32,
                    };
                    index.method_count += 1;
                    index
                        .methods_by_name
                        .entry(method.identifier.clone())
                        .or_default()
                        .push(method_id);
                    if let Some(returned) = method.return_type.identifier() {
                        index
                            .methods_by_return
                            .entry(returned.to_string())
                            .or_default()
                            .push(method_id);
                    }
                }
            }
        }
        index
    }

    pub fn types_named(&self, name: &str) -> &[TypeId] {
        self.types_by_name.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn types_with_base(&self, name: &str) -> &[TypeId] {
        self.types_by_base.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn methods_named(&self, name: &str) -> &[MethodId] {
        self.methods_by_name.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn methods_returning(&self, name: &str) -> &[MethodId] {
        self.methods_by_return.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn method_count(&self) -> usize {
        self.method_count
    }
}
