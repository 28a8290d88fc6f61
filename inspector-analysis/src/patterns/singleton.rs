//! Singleton checks. All three look at direct members of one type only.

use super::check::Check;
use super::result::MatchResult;
use super::DesignPattern;
use crate::compilation::CompilationView;
use crate::syntax::TypeDeclaration;

#[derive(Debug, Clone, Copy)]
pub enum SingletonCheck<'a> {
    HasPrivateConstructor(&'a TypeDeclaration),
    HasPrivateStaticSelfField(&'a TypeDeclaration),
    HasGetInstanceSelfMethod(&'a TypeDeclaration),
}

impl Check for SingletonCheck<'_> {
    fn name(&self) -> &'static str {
        match self {
            SingletonCheck::HasPrivateConstructor(_) => "HasPrivateConstructor",
            SingletonCheck::HasPrivateStaticSelfField(_) => "HasPrivateStaticSelfField",
            SingletonCheck::HasGetInstanceSelfMethod(_) => "HasGetInstanceSelfMethod",
        }
    }

    fn pattern(&self) -> DesignPattern {
        DesignPattern::Singleton
    }

    fn evaluate(&self, _view: &CompilationView) -> MatchResult {
        match *self {
            SingletonCheck::HasPrivateConstructor(ty) => has_private_constructor(ty),
            SingletonCheck::HasPrivateStaticSelfField(ty) => has_private_static_self_field(ty),
            SingletonCheck::HasGetInstanceSelfMethod(ty) => has_get_instance_self_method(ty),
        }
    }
}

/// The three checks in the order the orchestrator runs them.
pub fn checks(ty: &TypeDeclaration) -> [SingletonCheck<'_>; 3] {
    [
        SingletonCheck::HasPrivateConstructor(ty),
        SingletonCheck::HasPrivateStaticSelfField(ty),
        SingletonCheck::HasGetInstanceSelfMethod(ty),
    ]
}

/// At least one constructor is explicitly `private`.
pub fn has_private_constructor(ty: &TypeDeclaration) -> MatchResult {
    let found = ty
        .constructors()
        .any(|ctor| ctor.modifiers.is_private() && !ctor.modifiers.is_public());
    if found {
        MatchResult::found(ty.identifier_location.clone())
    } else {
        MatchResult::not_found()
    }
}

/// A `private static` field typed as the enclosing type.
pub fn has_private_static_self_field(ty: &TypeDeclaration) -> MatchResult {
    ty.fields()
        .find(|field| {
            field.modifiers.is_private()
                && field.modifiers.is_static()
                && field.declared_type.has_identifier(&ty.identifier)
        })
        .map_or_else(MatchResult::not_found, |field| {
            MatchResult::found(ty.identifier_location.clone()).with_evidence(field.first_name())
        })
}

/// A `public static` method returning the enclosing type.
pub fn has_get_instance_self_method(ty: &TypeDeclaration) -> MatchResult {
    ty.methods()
        .find(|method| {
            method.modifiers.is_public()
                && method.modifiers.is_static()
                && method.return_type.has_identifier(&ty.identifier)
        })
        .map_or_else(MatchResult::not_found, |method| {
            MatchResult::found(ty.identifier_location.clone()).with_evidence(&method.identifier)
        })
}
