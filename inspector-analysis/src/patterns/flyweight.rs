//! Flyweight checks.
//!
//! Collection recognition needs the semantic model: a field is a flyweight
//! pool when its type implements a collection contract, whatever its name.
//! When that information is missing the checks answer `Unsupported`
//! instead of guessing.

use super::check::Check;
use super::result::{MatchResult, UnsupportedReason};
use super::DesignPattern;
use crate::compilation::CompilationView;
use crate::syntax::{FieldDeclaration, MethodDeclaration, TypeDeclaration};

/// Collection element types found among one type's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlyweightContext {
    pub element_types: Vec<String>,
    /// Fields whose collection-ness or element type could not be resolved.
    pub unresolved: usize,
}

impl FlyweightContext {
    /// Runs `HasFlyweightCollection` over every field of `ty`.
    pub fn collect(ty: &TypeDeclaration, view: &CompilationView) -> Self {
        let mut context = Self::default();
        for field in ty.fields() {
            let result = has_flyweight_collection(field, view);
            if result.is_unsupported() {
                context.unresolved += 1;
            } else if result.matched() {
                if let Some(element) = result.evidence {
                    if !context.element_types.contains(&element) {
                        context.element_types.push(element);
                    }
                }
            }
        }
        context
    }

    pub fn tracks(&self, element_type: &str) -> bool {
        self.element_types.iter().any(|tracked| tracked == element_type)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FlyweightCheck<'a> {
    HasFlyweightCollection(&'a FieldDeclaration),
    HasGetFlyweightMethod(&'a MethodDeclaration, &'a FlyweightContext),
}

impl Check for FlyweightCheck<'_> {
    fn name(&self) -> &'static str {
        match self {
            FlyweightCheck::HasFlyweightCollection(_) => "HasFlyweightCollection",
            FlyweightCheck::HasGetFlyweightMethod(..) => "HasGetFlyweightMethod",
        }
    }

    fn pattern(&self) -> DesignPattern {
        DesignPattern::Flyweight
    }

    fn evaluate(&self, view: &CompilationView) -> MatchResult {
        match *self {
            FlyweightCheck::HasFlyweightCollection(field) => has_flyweight_collection(field, view),
            FlyweightCheck::HasGetFlyweightMethod(method, context) => {
                has_get_flyweight_method(method, context)
            }
        }
    }
}

/// A field whose type is, or implements, a collection contract.
///
/// Evidence is the collection's element type.
pub fn has_flyweight_collection(field: &FieldDeclaration, view: &CompilationView) -> MatchResult {
    let Some(semantics) = view.semantics() else {
        return MatchResult::unsupported(UnsupportedReason::NoSemanticModel);
    };
    let declared = &field.declared_type;
    match semantics.is_collection(declared) {
        None => {
            tracing::trace!(field = field.first_name(), ty = %declared, "field type unresolved");
            MatchResult::unsupported(UnsupportedReason::UnresolvedType(declared.to_string()))
        }
        Some(false) => MatchResult::not_found(),
        Some(true) => {
            let element = semantics.element_type(declared);
            match element.as_ref().and_then(|element| element.simple_name()) {
                Some(name) => MatchResult::found(field.location.clone()).with_evidence(name),
                None => {
                    tracing::trace!(ty = %declared, "collection element type unresolved");
                    MatchResult::unsupported(UnsupportedReason::UnresolvedElementType(
                        declared.to_string(),
                    ))
                }
            }
        }
    }
}

/// A public, non-void method that conditionally constructs its own return
/// type, where that type is an element type tracked by `context`.
pub fn has_get_flyweight_method(method: &MethodDeclaration, context: &FlyweightContext) -> MatchResult {
    if !method.modifiers.is_public() || method.return_type.is_void() {
        return MatchResult::not_found();
    }
    let Some(body) = &method.body else {
        return MatchResult::not_found();
    };
    let Some(returned) = method.return_type.simple_name() else {
        return MatchResult::not_found();
    };

    let creates_returned = body.conditionals().iter().any(|conditional| {
        conditional.object_creations().iter().any(|creation| {
            creation
                .created_type
                .as_ref()
                .and_then(|created| created.simple_name())
                == Some(returned)
        })
    });
    if !creates_returned {
        return MatchResult::not_found();
    }

    if context.tracks(returned) {
        MatchResult::found(method.identifier_location.clone()).with_evidence(returned)
    } else if context.unresolved > 0 {
        MatchResult::unsupported(UnsupportedReason::UnresolvedElementType(returned.to_string()))
    } else {
        MatchResult::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::result::Verdict;

    const FACTORY: &str = r#"
        using System.Collections.Generic;

        public class FlyweightFactory
        {
            private Dictionary<string, Flyweight> _flyweights = new Dictionary<string, Flyweight>();
            private int _count;

            public Flyweight GetFlyweight(string key)
            {
                if (!_flyweights.ContainsKey(key))
                {
                    _flyweights.Add(key, new Flyweight(key));
                }
                return _flyweights[key];
            }

            private Flyweight Hidden(string key)
            {
                if (key == null) { return new Flyweight(key); }
                return null;
            }

            public Flyweight Plain(string key) { return new Flyweight(key); }

            public void Reset() { if (_count > 0) { var f = new Flyweight("x"); } }
        }

        public class Flyweight
        {
            public Flyweight(string state) { }
        }
    "#;

    fn factory<'v>(view: &'v CompilationView) -> &'v TypeDeclaration {
        view.types_named("FlyweightFactory").next().unwrap()
    }

    fn method<'v>(ty: &'v TypeDeclaration, name: &str) -> &'v MethodDeclaration {
        ty.methods().find(|m| m.identifier == name).unwrap()
    }

    #[test]
    fn dictionary_field_tracks_its_value_type() {
        let view = CompilationView::from_sources([("FlyweightFactory.cs", FACTORY)]).unwrap();
        let ty = factory(&view);
        let context = FlyweightContext::collect(ty, &view);
        assert_eq!(context.element_types, vec!["Flyweight".to_string()]);
        assert_eq!(context.unresolved, 0);
    }

    #[test]
    fn get_flyweight_shape() {
        let view = CompilationView::from_sources([("FlyweightFactory.cs", FACTORY)]).unwrap();
        let ty = factory(&view);
        let context = FlyweightContext::collect(ty, &view);

        let result = has_get_flyweight_method(method(ty, "GetFlyweight"), &context);
        assert!(result.matched());
        assert_eq!(result.evidence.as_deref(), Some("Flyweight"));

        assert!(!has_get_flyweight_method(method(ty, "Hidden"), &context).matched());
        assert!(!has_get_flyweight_method(method(ty, "Plain"), &context).matched());
        assert!(!has_get_flyweight_method(method(ty, "Reset"), &context).matched());
    }

    #[test]
    fn untracked_return_type_is_not_a_match() {
        let view = CompilationView::from_sources([("FlyweightFactory.cs", FACTORY)]).unwrap();
        let ty = factory(&view);
        let result = has_get_flyweight_method(method(ty, "GetFlyweight"), &FlyweightContext::default());
        assert_eq!(result.verdict, Verdict::NoMatch);
    }

    #[test]
    fn missing_semantics_is_unsupported() {
        let trees = CompilationView::from_sources([("FlyweightFactory.cs", FACTORY)])
            .unwrap()
            .trees()
            .to_vec();
        let view = CompilationView::without_semantics(trees);
        let ty = factory(&view);
        let field = ty.fields().next().unwrap();
        assert_eq!(
            has_flyweight_collection(field, &view).verdict,
            Verdict::Unsupported(UnsupportedReason::NoSemanticModel)
        );

        let context = FlyweightContext::collect(ty, &view);
        assert!(context.element_types.is_empty());
        assert_eq!(context.unresolved, 2);
        let result = has_get_flyweight_method(method(ty, "GetFlyweight"), &context);
        assert!(result.is_unsupported());
        assert!(!result.matched());
    }

    #[test]
    fn unknown_field_type_is_unresolved() {
        let view = CompilationView::from_sources([(
            "Pool.cs",
            "class Pool { private ExternalCache<Car> _cache; }",
        )])
        .unwrap();
        let field = view.types().next().unwrap().fields().next().unwrap();
        assert!(has_flyweight_collection(field, &view).is_unsupported());
    }
}
