//! Decorator checks.
//!
//! `HasAbstractClass` discovers the component ("reference") type of a
//! class. The field and constructor checks then look for that same type.
//! The discovered type travels in a [`DecoratorContext`] built for one
//! class declaration and dropped with it.

use super::check::Check;
use super::result::MatchResult;
use super::DesignPattern;
use crate::compilation::CompilationView;
use crate::syntax::{Expression, LocalDeclaration, ObjectCreation, TypeDeclaration};

/// Facts discovered for one class during one Decorator evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoratorContext {
    pub reference_type: Option<String>,
}

impl DecoratorContext {
    /// Runs `HasAbstractClass` and keeps its evidence.
    pub fn discover(ty: &TypeDeclaration, view: &CompilationView) -> Self {
        Self::from_result(&has_abstract_class(ty, view))
    }

    pub fn from_result(result: &MatchResult) -> Self {
        Self {
            reference_type: if result.matched() {
                result.evidence.clone()
            } else {
                None
            },
        }
    }

    pub fn reference_type(&self) -> Option<&str> {
        self.reference_type.as_deref()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum DecoratorCheck<'a> {
    HasAbstractClass(&'a TypeDeclaration),
    HasPrivateStaticField(&'a TypeDeclaration, &'a DecoratorContext),
    HasConstructor(&'a TypeDeclaration, &'a DecoratorContext),
    AnalyzeStatement(&'a LocalDeclaration),
}

impl Check for DecoratorCheck<'_> {
    fn name(&self) -> &'static str {
        match self {
            DecoratorCheck::HasAbstractClass(_) => "HasAbstractClass",
            DecoratorCheck::HasPrivateStaticField(..) => "HasPrivateStaticField",
            DecoratorCheck::HasConstructor(..) => "HasConstructor",
            DecoratorCheck::AnalyzeStatement(_) => "AnalyzeStatement",
        }
    }

    fn pattern(&self) -> DesignPattern {
        DesignPattern::Decorator
    }

    fn evaluate(&self, view: &CompilationView) -> MatchResult {
        match *self {
            DecoratorCheck::HasAbstractClass(ty) => has_abstract_class(ty, view),
            DecoratorCheck::HasPrivateStaticField(ty, context) => {
                has_private_static_field(ty, context)
            }
            DecoratorCheck::HasConstructor(ty, context) => has_constructor(ty, context),
            DecoratorCheck::AnalyzeStatement(local) => analyze_statement(local),
        }
    }
}

fn same_declaration(a: &TypeDeclaration, b: &TypeDeclaration) -> bool {
    std::ptr::eq(a, b) || a.identifier_location == b.identifier_location
}

/// A class whose base list names the component abstraction.
///
/// A base identifier `B` qualifies when some other abstract class or
/// interface in the compilation is itself named `B`, or also derives from
/// `B`. Evidence is `B`, the reference type.
pub fn has_abstract_class(ty: &TypeDeclaration, view: &CompilationView) -> MatchResult {
    if ty.is_interface() {
        return MatchResult::not_found();
    }
    let other_abstraction = |candidate: &TypeDeclaration| {
        candidate.is_abstraction() && !same_declaration(candidate, ty)
    };
    let reference = ty.base_identifiers().find(|base| {
        view.types_named(base).any(|candidate| other_abstraction(candidate))
            || view.types_with_base(base).any(|candidate| other_abstraction(candidate))
    });
    match reference {
        Some(reference) => {
            MatchResult::found(ty.identifier_location.clone()).with_evidence(reference)
        }
        None => MatchResult::not_found(),
    }
}

/// A `private` field of the reference type.
///
/// The name is historical: the field need not be static.
pub fn has_private_static_field(ty: &TypeDeclaration, context: &DecoratorContext) -> MatchResult {
    let Some(reference) = context.reference_type() else {
        return MatchResult::not_found();
    };
    ty.fields()
        .find(|field| field.modifiers.is_private() && field.declared_type.has_identifier(reference))
        .map_or_else(MatchResult::not_found, |field| {
            MatchResult::found(field.location.clone()).with_evidence(field.first_name())
        })
}

/// A `public` constructor whose first parameter is the reference type.
pub fn has_constructor(ty: &TypeDeclaration, context: &DecoratorContext) -> MatchResult {
    let Some(reference) = context.reference_type() else {
        return MatchResult::not_found();
    };
    ty.constructors()
        .find(|ctor| {
            ctor.modifiers.is_public()
                && ctor
                    .first_parameter()
                    .and_then(|param| param.declared_type.as_ref())
                    .is_some_and(|declared| declared.has_identifier(reference))
        })
        .map_or_else(MatchResult::not_found, |ctor| {
            MatchResult::found(ctor.location.clone()).with_evidence(reference)
        })
}

/// A local initialized by one construction wrapped around another, as in
/// `var drink = new Milk(new Soy(new Espresso()));`.
///
/// Evidence is the outermost constructed type.
pub fn analyze_statement(local: &LocalDeclaration) -> MatchResult {
    let wrapper = local
        .initializers()
        .filter_map(Expression::as_object_creation)
        .find(|creation| is_wrapping_chain(creation));
    match wrapper {
        Some(creation) => {
            let mut result = MatchResult::found(local.location.clone());
            if let Some(created) = &creation.created_type {
                result = result.with_evidence(created.to_string());
            }
            result
        }
        None => MatchResult::not_found(),
    }
}

/// The first argument is a construction, and following first arguments
/// inward never ends in a literal. The innermost component may be a bare
/// construction, a variable, or any other expression.
pub fn is_wrapping_chain(creation: &ObjectCreation) -> bool {
    let Some(mut inner) = creation
        .arguments
        .first()
        .and_then(Expression::as_object_creation)
    else {
        return false;
    };
    while let Some(argument) = inner.arguments.first() {
        match argument {
            Expression::ObjectCreation(next) => inner = next,
            Expression::Literal(_) => return false,
            _ => break,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEVERAGE: &str = r#"
        public abstract class Beverage
        {
            public abstract double Cost();
        }
        public abstract class CondimentDecorator : Beverage { }
    "#;

    const MILK: &str = r#"
        public class Milk : Beverage
        {
            private Beverage _beverage;
            public Milk(Beverage beverage) { _beverage = beverage; }
            public Milk() { }
            public override double Cost() { return 0.1 + _beverage.Cost(); }
        }
        public class Espresso : Beverage
        {
            public override double Cost() { return 1.99; }
        }
    "#;

    fn view() -> CompilationView {
        CompilationView::from_sources([("Beverage.cs", BEVERAGE), ("Milk.cs", MILK)]).unwrap()
    }

    fn local(source: &str) -> LocalDeclaration {
        let view = CompilationView::from_sources([("Main.cs", source)]).unwrap();
        let ty = view.types().next().unwrap();
        let method = ty.methods().next().unwrap();
        method.body.as_ref().unwrap().local_declarations()[0].clone()
    }

    #[test]
    fn reference_type_flows_through_context() {
        let view = view();
        let milk = view.types_named("Milk").next().unwrap();
        let context = DecoratorContext::discover(milk, &view);
        assert_eq!(context.reference_type(), Some("Beverage"));
        assert!(has_private_static_field(milk, &context).matched());
        assert!(has_constructor(milk, &context).matched());
    }

    #[test]
    fn concrete_component_has_no_wrapped_field() {
        let view = view();
        let espresso = view.types_named("Espresso").next().unwrap();
        let context = DecoratorContext::discover(espresso, &view);
        assert_eq!(context.reference_type(), Some("Beverage"));
        assert!(!has_private_static_field(espresso, &context).matched());
        assert!(!has_constructor(espresso, &context).matched());
    }

    #[test]
    fn empty_context_never_matches() {
        let view = view();
        let milk = view.types_named("Milk").next().unwrap();
        let context = DecoratorContext::default();
        assert!(!has_private_static_field(milk, &context).matched());
        assert!(!has_constructor(milk, &context).matched());
    }

    #[test]
    fn base_without_other_abstraction_is_not_a_component() {
        let view = CompilationView::from_sources([(
            "Plain.cs",
            "class Base { } class Derived : Base { private Base _b; public Derived(Base b) { } }",
        )])
        .unwrap();
        let derived = view.types_named("Derived").next().unwrap();
        assert!(!has_abstract_class(derived, &view).matched());
    }

    #[test]
    fn wrapping_chains() {
        let wrapped = local("class P { void Run() { var b = new Milk(new Soy()); } }");
        let result = analyze_statement(&wrapped);
        assert!(result.matched());
        assert_eq!(result.evidence.as_deref(), Some("Milk"));

        let deep = local("class P { void Run() { Beverage b = new Milk(new Soy(new Espresso())); } }");
        assert!(analyze_statement(&deep).matched());

        let variable = local("class P { void Run(Beverage espresso) { var b = new Milk(new Soy(espresso)); } }");
        assert!(analyze_statement(&variable).matched());

        let literal = local(r#"class P { void Run() { var b = new Milk(new Soy("x")); } }"#);
        assert!(!analyze_statement(&literal).matched());

        let bare = local("class P { void Run() { var b = new Milk(); } }");
        assert!(!analyze_statement(&bare).matched());

        let unwrapped = local("class P { void Run(Beverage other) { var b = new Milk(other); } }");
        assert!(!analyze_statement(&unwrapped).matched());
    }
}
