//! Semantic information: resolved interface sets and collection element types.
//!
//! The default model resolves by simple name against a catalog of .NET
//! collection types and the compilation's own declarations. It performs no
//! namespace disambiguation.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::syntax::{SourceTree, TypeRef};

/// Interfaces that make a type a collection in the add/enumerate/lookup sense.
pub const COLLECTION_CONTRACTS: &[&str] = &["ICollection", "IList", "IDictionary", "ISet"];

const ARRAY_INTERFACES: &[&str] = &[
    "IList",
    "ICollection",
    "IEnumerable",
    "IReadOnlyList",
    "IReadOnlyCollection",
];

/// Semantic queries a host may answer. `None` means "could not resolve",
/// which callers treat as unsupported rather than as a negative answer.
pub trait SemanticModel: Send + Sync {
    /// Supertypes and implemented interfaces of `ty`, by simple name.
    fn interfaces(&self, ty: &TypeRef) -> Option<Vec<String>>;

    /// The element type a collection-typed `ty` holds.
    fn element_type(&self, ty: &TypeRef) -> Option<TypeRef>;

    /// Whether `ty` implements, or is, a collection contract.
    fn is_collection(&self, ty: &TypeRef) -> Option<bool> {
        let interfaces = self.interfaces(ty)?;
        let is_contract = ty
            .identifier()
            .is_some_and(|name| COLLECTION_CONTRACTS.contains(&name));
        Some(
            is_contract
                || interfaces
                    .iter()
                    .any(|interface| COLLECTION_CONTRACTS.contains(&interface.as_str())),
        )
    }
}

/// Name-based semantic model built from the declarations of a compilation.
#[derive(Debug, Default)]
pub struct DeclaredTypeSemantics {
    /// Declared type name → base-list entries, merged across partial and same-named declarations.
    declared: FxHashMap<String, Vec<TypeRef>>,
}

impl DeclaredTypeSemantics {
    pub fn from_trees(trees: &[SourceTree]) -> Self {
        let mut declared: FxHashMap<String, Vec<TypeRef>> = FxHashMap::default();
        for ty in trees.iter().flat_map(|tree| &tree.types) {
            declared
                .entry(ty.identifier.clone())
                .or_default()
                .extend(ty.base_types.iter().cloned());
        }
        Self { declared }
    }

    /// A model that knows only the built-in collection catalog.
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Adds every supertype reachable from `name` to `out`. Returns false
    /// when `name` is neither built in nor declared.
    fn collect_supertypes(
        &self,
        name: &str,
        seen: &mut FxHashSet<String>,
        out: &mut BTreeSet<String>,
    ) -> bool {
        if !seen.insert(name.to_string()) {
            return true;
        }
        let mut resolved = false;
        if let Some(interfaces) = builtin_interfaces(name) {
            resolved = true;
            out.extend(interfaces.iter().map(|i| i.to_string()));
        }
        if let Some(bases) = self.declared.get(name) {
            resolved = true;
            for base in bases.iter().filter_map(TypeRef::identifier) {
                out.insert(base.to_string());
                self.collect_supertypes(base, seen, out);
            }
        }
        resolved
    }

    /// Dictionaries and `KeyedCollection<TKey, TItem>` hold their last type argument.
    fn element_is_last_argument(&self, name: &str) -> bool {
        name == "KeyedCollection"
            || name == "IDictionary"
            || name == "IReadOnlyDictionary"
            || self
                .interfaces(&TypeRef::named(name))
                .is_some_and(|set| set.iter().any(|i| i == "IDictionary"))
    }

    fn element_of(&self, ty: &TypeRef, seen: &mut FxHashSet<String>) -> Option<TypeRef> {
        match ty {
            TypeRef::Array(element) => Some((**element).clone()),
            TypeRef::Nullable(inner) => self.element_of(inner, seen),
            TypeRef::Named {
                name, arguments, ..
            } => {
                if !arguments.is_empty() {
                    return if self.element_is_last_argument(name) {
                        arguments.last().cloned()
                    } else {
                        arguments.first().cloned()
                    };
                }
                if !seen.insert(name.clone()) {
                    return None;
                }
                self.declared
                    .get(name)?
                    .iter()
                    .find_map(|base| self.element_of(base, seen))
            }
            _ => None,
        }
    }
}

impl SemanticModel for DeclaredTypeSemantics {
    fn interfaces(&self, ty: &TypeRef) -> Option<Vec<String>> {
        match ty {
            TypeRef::Predefined(keyword) if keyword == "string" => {
                Some(vec!["IEnumerable".to_string(), "IComparable".to_string()])
            }
            TypeRef::Predefined(_) => Some(Vec::new()),
            TypeRef::Array(_) => Some(ARRAY_INTERFACES.iter().map(|i| i.to_string()).collect()),
            TypeRef::Nullable(inner) => self.interfaces(inner),
            TypeRef::Named { name, .. } => {
                let mut seen = FxHashSet::default();
                let mut out = BTreeSet::new();
                self.collect_supertypes(name, &mut seen, &mut out)
                    .then(|| out.into_iter().collect())
            }
            TypeRef::Other(_) => None,
        }
    }

    fn element_type(&self, ty: &TypeRef) -> Option<TypeRef> {
        let mut seen = FxHashSet::default();
        self.element_of(ty, &mut seen)
    }
}

/// Interface sets of well-known .NET collection types and contracts.
fn builtin_interfaces(name: &str) -> Option<&'static [&'static str]> {
    let interfaces: &'static [&'static str] = match name {
        "List" | "Collection" | "ObservableCollection" | "ReadOnlyCollection" | "ArrayList"
        | "KeyedCollection" | "BindingList" => &[
            "IList",
            "ICollection",
            "IEnumerable",
            "IReadOnlyList",
            "IReadOnlyCollection",
        ],
        "LinkedList" | "Queue" | "Stack" | "ConcurrentQueue" | "ConcurrentStack"
        | "ConcurrentBag" | "BlockingCollection" => {
            &["ICollection", "IEnumerable", "IReadOnlyCollection"]
        }
        "HashSet" | "SortedSet" => &[
            "ISet",
            "ICollection",
            "IEnumerable",
            "IReadOnlySet",
            "IReadOnlyCollection",
        ],
        "Dictionary" | "SortedDictionary" | "SortedList" | "ConcurrentDictionary"
        | "Hashtable" => &[
            "IDictionary",
            "ICollection",
            "IEnumerable",
            "IReadOnlyDictionary",
            "IReadOnlyCollection",
        ],
        "IList" | "IDictionary" | "ISet" => &["ICollection", "IEnumerable"],
        "ICollection" | "IReadOnlyCollection" | "IReadOnlyList" | "IReadOnlyDictionary"
        | "IReadOnlySet" => &["IEnumerable"],
        "IEnumerable" => &[],
        _ => return None,
    };
    Some(interfaces)
}
