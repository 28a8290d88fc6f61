//! Type and member declarations.
//!
//! Built once per analysis pass by the lowering step and never mutated by checks.

use serde::{Deserialize, Serialize};

use super::statements::{Block, VariableDeclarator};
use super::types::{Modifiers, TypeRef};
use crate::parsers::types::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Record,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
        }
    }
}

/// A class-like declaration with its direct members.
///
/// Nested types are separate `TypeDeclaration`s that name their parent in
/// `containing_type`; their members do not appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub identifier: String,
    pub identifier_location: Location,
    pub location: Location,
    pub namespace: Option<String>,
    pub containing_type: Option<String>,
    pub base_types: Vec<TypeRef>,
    pub members: Vec<MemberDeclaration>,
}

impl TypeDeclaration {
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Classes, structs, and records all answer member queries the same way.
    pub fn is_class_like(&self) -> bool {
        !self.is_interface()
    }

    /// An abstract class or an interface.
    pub fn is_abstraction(&self) -> bool {
        self.is_interface() || (self.kind == TypeKind::Class && self.modifiers.is_abstract())
    }

    /// Identifiers of the base-list entries, in source order.
    pub fn base_identifiers(&self) -> impl Iterator<Item = &str> {
        self.base_types.iter().filter_map(TypeRef::identifier)
    }

    pub fn has_base(&self, identifier: &str) -> bool {
        self.base_identifiers().any(|base| base == identifier)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.members.iter().filter_map(|member| match member {
            MemberDeclaration::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDeclaration> {
        self.members.iter().filter_map(|member| match member {
            MemberDeclaration::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.members.iter().filter_map(|member| match member {
            MemberDeclaration::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.members.iter().filter_map(|member| match member {
            MemberDeclaration::Property(property) => Some(property),
            _ => None,
        })
    }

    /// `Namespace.Outer.Name`, for display only. Matching never uses it.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(namespace) = &self.namespace {
            parts.push(namespace);
        }
        if let Some(containing) = &self.containing_type {
            parts.push(containing);
        }
        parts.push(&self.identifier);
        parts.join(".")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MemberDeclaration {
    Field(FieldDeclaration),
    Constructor(ConstructorDeclaration),
    Method(MethodDeclaration),
    Property(PropertyDeclaration),
}

impl MemberDeclaration {
    pub fn modifiers(&self) -> &Modifiers {
        match self {
            MemberDeclaration::Field(field) => &field.modifiers,
            MemberDeclaration::Constructor(constructor) => &constructor.modifiers,
            MemberDeclaration::Method(method) => &method.modifiers,
            MemberDeclaration::Property(property) => &property.modifiers,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            MemberDeclaration::Field(field) => &field.location,
            MemberDeclaration::Constructor(constructor) => &constructor.location,
            MemberDeclaration::Method(method) => &method.location,
            MemberDeclaration::Property(property) => &property.location,
        }
    }

    /// The body of a constructor, method, or property, if it has one.
    pub fn body(&self) -> Option<&Block> {
        match self {
            MemberDeclaration::Constructor(constructor) => constructor.body.as_ref(),
            MemberDeclaration::Method(method) => method.body.as_ref(),
            MemberDeclaration::Property(property) => property.body.as_ref(),
            MemberDeclaration::Field(_) => None,
        }
    }
}

/// `private static Singleton instance, backup;` is one field declaration
/// with two variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub modifiers: Modifiers,
    pub declared_type: TypeRef,
    pub variables: Vec<VariableDeclarator>,
    pub location: Location,
}

impl FieldDeclaration {
    pub fn first_name(&self) -> &str {
        self.variables
            .first()
            .map(|variable| variable.identifier.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    pub modifiers: Modifiers,
    pub identifier: String,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
    pub location: Location,
}

impl ConstructorDeclaration {
    pub fn first_parameter(&self) -> Option<&Parameter> {
        self.parameters.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub modifiers: Modifiers,
    pub identifier: String,
    pub identifier_location: Location,
    pub return_type: TypeRef,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
    pub location: Location,
}

impl MethodDeclaration {
    /// True when the method has no body at all or an empty block.
    pub fn has_empty_body(&self) -> bool {
        self.body
            .as_ref()
            .map_or(true, |body| body.statements.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub modifiers: Modifiers,
    pub identifier: String,
    pub declared_type: TypeRef,
    /// Statements of every accessor (`get`, `set`, `init`) in source order,
    /// or the expression of an expression-bodied property.
    pub body: Option<Block>,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub identifier: String,
    /// Absent for untyped lambda-style parameters.
    pub declared_type: Option<TypeRef>,
}
