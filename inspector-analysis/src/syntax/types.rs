//! Type references and modifiers as they appear in declarations.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// C# keywords that name built-in types.
pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "dynamic", "float", "int", "long", "nint",
    "nuint", "object", "sbyte", "short", "string", "uint", "ulong", "ushort", "void",
];

/// A type as written in source, structured just enough for name matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// A built-in keyword type such as `int`, `string`, or `void`.
    Predefined(String),
    /// A named type, optionally qualified and generic: `Ns.List<T>`.
    Named {
        name: String,
        qualifier: Option<String>,
        arguments: Vec<TypeRef>,
    },
    Array(Box<TypeRef>),
    Nullable(Box<TypeRef>),
    /// Tuples, pointers, `var`, and anything else matched only by text.
    Other(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            qualifier: None,
            arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            qualifier: None,
            arguments,
        }
    }

    /// Builds a predefined type when `text` is a built-in keyword, a named type otherwise.
    pub fn from_simple_name(text: &str) -> Self {
        if PREDEFINED_TYPES.contains(&text) {
            TypeRef::Predefined(text.to_string())
        } else {
            TypeRef::named(text)
        }
    }

    /// The rightmost simple name of a named type. `None` for built-ins,
    /// arrays, nullables, and unstructured types.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The identifier of a named type or the keyword of a built-in one.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            TypeRef::Predefined(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn has_identifier(&self, identifier: &str) -> bool {
        self.identifier() == Some(identifier)
    }

    pub fn is_predefined(&self) -> bool {
        matches!(self, TypeRef::Predefined(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Predefined(keyword) if keyword == "void")
    }

    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { arguments, .. } => arguments,
            _ => &[],
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Predefined(keyword) => f.write_str(keyword),
            TypeRef::Named {
                name,
                qualifier,
                arguments,
            } => {
                if let Some(qualifier) = qualifier {
                    write!(f, "{qualifier}.")?;
                }
                f.write_str(name)?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Array(element) => write!(f, "{element}[]"),
            TypeRef::Nullable(inner) => write!(f, "{inner}?"),
            TypeRef::Other(text) => f.write_str(text),
        }
    }
}

/// A declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Abstract,
    Sealed,
    Override,
    Virtual,
    Readonly,
    Const,
    Partial,
    Async,
    Extern,
    New,
    Other,
}

impl Modifier {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim() {
            "public" => Modifier::Public,
            "private" => Modifier::Private,
            "protected" => Modifier::Protected,
            "internal" => Modifier::Internal,
            "static" => Modifier::Static,
            "abstract" => Modifier::Abstract,
            "sealed" => Modifier::Sealed,
            "override" => Modifier::Override,
            "virtual" => Modifier::Virtual,
            "readonly" => Modifier::Readonly,
            "const" => Modifier::Const,
            "partial" => Modifier::Partial,
            "async" => Modifier::Async,
            "extern" => Modifier::Extern,
            "new" => Modifier::New,
            _ => Modifier::Other,
        }
    }
}

/// The explicit modifiers on a declaration, in source order.
///
/// Visibility queries look only at what is written: a member without an
/// access keyword is neither `is_public()` nor `is_private()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers(SmallVec<[Modifier; 4]>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, modifier: Modifier) {
        self.0.push(modifier);
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_public(&self) -> bool {
        self.has(Modifier::Public)
    }

    pub fn is_private(&self) -> bool {
        self.has(Modifier::Private)
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.has(Modifier::Abstract)
    }

    pub fn is_override(&self) -> bool {
        self.has(Modifier::Override)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.iter()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Modifiers(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_rightmost_name_only_for_named_types() {
        let qualified = TypeRef::Named {
            name: "Product".to_string(),
            qualifier: Some("Shop.Model".to_string()),
            arguments: Vec::new(),
        };
        assert_eq!(qualified.identifier(), Some("Product"));
        assert_eq!(qualified.to_string(), "Shop.Model.Product");

        assert_eq!(TypeRef::from_simple_name("string").identifier(), None);
        assert_eq!(TypeRef::from_simple_name("string").simple_name(), Some("string"));
        assert!(TypeRef::from_simple_name("void").is_void());
        assert_eq!(TypeRef::Array(Box::new(TypeRef::named("Car"))).identifier(), None);
    }

    #[test]
    fn generic_display() {
        let ty = TypeRef::generic(
            "Dictionary",
            vec![TypeRef::from_simple_name("string"), TypeRef::named("Flyweight")],
        );
        assert_eq!(ty.to_string(), "Dictionary<string, Flyweight>");
        assert_eq!(ty.type_arguments().len(), 2);
    }

    #[test]
    fn modifiers_are_explicit() {
        let modifiers: Modifiers = ["private", "static", "readonly"]
            .iter()
            .map(|k| Modifier::from_keyword(k))
            .collect();
        assert!(modifiers.is_private());
        assert!(modifiers.is_static());
        assert!(!modifiers.is_public());
        assert!(!Modifiers::new().is_private());
    }
}
