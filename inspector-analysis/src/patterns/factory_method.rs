//! Factory Method checks.
//!
//! Each check is a signal on its own. Product interface and concrete
//! product recognition search the whole compilation: the interface, the
//! abstract creator, and the implementing class usually live in different
//! files. Correlation is by simple identifier only, so same-named types in
//! different namespaces are not told apart.

use super::check::Check;
use super::result::MatchResult;
use super::DesignPattern;
use crate::compilation::CompilationView;
use crate::syntax::{Expression, LocalDeclaration, MethodDeclaration, TypeDeclaration};

#[derive(Debug, Clone, Copy)]
pub enum FactoryMethodCheck<'a> {
    IsAbstractFactoryMethod(&'a MethodDeclaration),
    OverridesAbstractFactoryMethod(&'a MethodDeclaration),
    IsProductInterface(&'a TypeDeclaration),
    IsConcreteProduct(&'a TypeDeclaration),
    DeclarationWithFactoryMethod(&'a LocalDeclaration),
}

impl Check for FactoryMethodCheck<'_> {
    fn name(&self) -> &'static str {
        match self {
            FactoryMethodCheck::IsAbstractFactoryMethod(_) => "IsAbstractFactoryMethod",
            FactoryMethodCheck::OverridesAbstractFactoryMethod(_) => {
                "OverridesAbstractFactoryMethod"
            }
            FactoryMethodCheck::IsProductInterface(_) => "IsProductInterface",
            FactoryMethodCheck::IsConcreteProduct(_) => "IsConcreteProduct",
            FactoryMethodCheck::DeclarationWithFactoryMethod(_) => "DeclarationWithFactoryMethod",
        }
    }

    fn pattern(&self) -> DesignPattern {
        DesignPattern::FactoryMethod
    }

    fn evaluate(&self, view: &CompilationView) -> MatchResult {
        match *self {
            FactoryMethodCheck::IsAbstractFactoryMethod(method) => {
                is_abstract_factory_method(method)
            }
            FactoryMethodCheck::OverridesAbstractFactoryMethod(method) => {
                overrides_abstract_factory_method(method)
            }
            FactoryMethodCheck::IsProductInterface(ty) => is_product_interface(ty, view),
            FactoryMethodCheck::IsConcreteProduct(ty) => is_concrete_product(ty, view),
            FactoryMethodCheck::DeclarationWithFactoryMethod(local) => {
                declaration_with_factory_method(local, view)
            }
        }
    }
}

/// An `abstract` method whose return type is not a built-in type.
///
/// Evidence is the returned type, which is the product abstraction.
pub fn is_abstract_factory_method(method: &MethodDeclaration) -> MatchResult {
    if !method.modifiers.is_abstract() || method.return_type.is_predefined() {
        return MatchResult::not_found();
    }
    MatchResult::found(method.identifier_location.clone())
        .with_evidence(method.return_type.to_string())
}

/// An `override` method with a non built-in return type that instantiates
/// something in its body.
pub fn overrides_abstract_factory_method(method: &MethodDeclaration) -> MatchResult {
    if !method.modifiers.is_override() || method.return_type.is_predefined() {
        return MatchResult::not_found();
    }
    let Some(body) = &method.body else {
        return MatchResult::not_found();
    };
    match body.object_creations().first() {
        Some(creation) => {
            let mut result = MatchResult::found(method.identifier_location.clone());
            if let Some(created) = &creation.created_type {
                result = result.with_evidence(created.to_string());
            }
            result
        }
        None => MatchResult::not_found(),
    }
}

/// An interface returned by some abstract factory method in the compilation.
pub fn is_product_interface(ty: &TypeDeclaration, view: &CompilationView) -> MatchResult {
    if !ty.is_interface() {
        return MatchResult::not_found();
    }
    let creator = view
        .methods_returning(&ty.identifier)
        .find(|method| is_abstract_factory_method(method).matched());
    match creator {
        Some(method) => {
            MatchResult::found(ty.identifier_location.clone()).with_evidence(&method.identifier)
        }
        None => {
            tracing::trace!(interface = %ty.identifier, "no abstract factory method returns interface");
            MatchResult::not_found()
        }
    }
}

/// A class whose base list names a product interface.
///
/// Evidence is the product interface identifier.
pub fn is_concrete_product(ty: &TypeDeclaration, view: &CompilationView) -> MatchResult {
    if !ty.is_class_like() {
        return MatchResult::not_found();
    }
    let product = ty.base_identifiers().find(|base| {
        view.types_named(base)
            .any(|candidate| is_product_interface(candidate, view).matched())
    });
    match product {
        Some(product) => MatchResult::found(ty.identifier_location.clone()).with_evidence(product),
        None => MatchResult::not_found(),
    }
}

/// A local whose initializer is a call to an abstract factory method
/// declared anywhere in the compilation.
///
/// Evidence is the invoked method name.
pub fn declaration_with_factory_method(
    local: &LocalDeclaration,
    view: &CompilationView,
) -> MatchResult {
    for initializer in local.initializers() {
        let Expression::Invocation(invocation) = initializer else {
            continue;
        };
        let Some(target) = invocation.target.as_deref() else {
            continue;
        };
        if view
            .methods_named(target)
            .any(|method| is_abstract_factory_method(method).matched())
        {
            return MatchResult::found(local.location.clone()).with_evidence(target);
        }
        tracing::trace!(method = target, "invoked method is not a known abstract factory method");
    }
    MatchResult::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATOR: &str = r#"
        namespace Shop
        {
            public abstract class Creator
            {
                public abstract IProduct FactoryMethod();
                public abstract string Describe();
                public string SomeOperation()
                {
                    var product = FactoryMethod();
                    return "made";
                }
            }
        }
    "#;

    const PRODUCTS: &str = r#"
        namespace Shop
        {
            public interface IProduct { string Operation(); }
            public interface IUnrelated { }
            class ConcreteProduct1 : IProduct { public string Operation() { return "1"; } }
            class ConcreteCreator1 : Creator
            {
                public override IProduct FactoryMethod() { return new ConcreteProduct1(); }
                public override string Describe() { return "x"; }
            }
        }
    "#;

    fn view() -> CompilationView {
        CompilationView::from_sources([("Creator.cs", CREATOR), ("Products.cs", PRODUCTS)]).unwrap()
    }

    fn method<'v>(view: &'v CompilationView, owner: &str, name: &str) -> &'v MethodDeclaration {
        view.types_named(owner)
            .next()
            .unwrap()
            .methods()
            .find(|m| m.identifier == name)
            .unwrap()
    }

    #[test]
    fn abstract_method_needs_non_builtin_return() {
        let view = view();
        let factory = is_abstract_factory_method(method(&view, "Creator", "FactoryMethod"));
        assert!(factory.matched());
        assert_eq!(factory.evidence.as_deref(), Some("IProduct"));
        assert!(!is_abstract_factory_method(method(&view, "Creator", "Describe")).matched());
        assert!(!is_abstract_factory_method(method(&view, "Creator", "SomeOperation")).matched());
    }

    #[test]
    fn override_must_instantiate() {
        let view = view();
        let result = overrides_abstract_factory_method(method(&view, "ConcreteCreator1", "FactoryMethod"));
        assert!(result.matched());
        assert_eq!(result.evidence.as_deref(), Some("ConcreteProduct1"));
        assert!(!overrides_abstract_factory_method(method(&view, "ConcreteCreator1", "Describe")).matched());
    }

    #[test]
    fn product_interface_is_found_across_files() {
        let view = view();
        let product = view.types_named("IProduct").next().unwrap();
        let unrelated = view.types_named("IUnrelated").next().unwrap();
        assert!(is_product_interface(product, &view).matched());
        assert!(!is_product_interface(unrelated, &view).matched());

        let lonely = CompilationView::from_sources([("Products.cs", PRODUCTS)]).unwrap();
        let product = lonely.types_named("IProduct").next().unwrap();
        assert!(!is_product_interface(product, &lonely).matched());
    }

    #[test]
    fn concrete_product_names_its_interface() {
        let view = view();
        let class = view.types_named("ConcreteProduct1").next().unwrap();
        let result = is_concrete_product(class, &view);
        assert!(result.matched());
        assert_eq!(result.evidence.as_deref(), Some("IProduct"));
        let creator = view.types_named("ConcreteCreator1").next().unwrap();
        assert!(!is_concrete_product(creator, &view).matched());
    }

    #[test]
    fn local_initialized_by_factory_call() {
        let view = view();
        let operation = method(&view, "Creator", "SomeOperation");
        let local = operation.body.as_ref().unwrap().local_declarations()[0];
        let result = declaration_with_factory_method(local, &view);
        assert!(result.matched());
        assert_eq!(result.evidence.as_deref(), Some("FactoryMethod"));
    }
}
