//! The uniform check contract and the closed set of check variants.

use super::decorator::DecoratorCheck;
use super::factory_method::FactoryMethodCheck;
use super::flyweight::FlyweightCheck;
use super::result::MatchResult;
use super::singleton::SingletonCheck;
use super::DesignPattern;
use crate::compilation::CompilationView;

/// A single structural question about one bound declaration.
pub trait Check {
    /// Check name as it appears in diagnostics, e.g. `HasPrivateConstructor`.
    fn name(&self) -> &'static str;

    fn pattern(&self) -> DesignPattern;

    /// Evaluates the check. Never panics on absent or unresolved input.
    fn evaluate(&self, view: &CompilationView) -> MatchResult;
}

/// Every check the analyzer knows, grouped by pattern.
#[derive(Debug, Clone)]
pub enum PatternCheck<'a> {
    Singleton(SingletonCheck<'a>),
    FactoryMethod(FactoryMethodCheck<'a>),
    Decorator(DecoratorCheck<'a>),
    Flyweight(FlyweightCheck<'a>),
}

impl Check for PatternCheck<'_> {
    fn name(&self) -> &'static str {
        match self {
            PatternCheck::Singleton(check) => check.name(),
            PatternCheck::FactoryMethod(check) => check.name(),
            PatternCheck::Decorator(check) => check.name(),
            PatternCheck::Flyweight(check) => check.name(),
        }
    }

    fn pattern(&self) -> DesignPattern {
        match self {
            PatternCheck::Singleton(_) => DesignPattern::Singleton,
            PatternCheck::FactoryMethod(_) => DesignPattern::FactoryMethod,
            PatternCheck::Decorator(_) => DesignPattern::Decorator,
            PatternCheck::Flyweight(_) => DesignPattern::Flyweight,
        }
    }

    fn evaluate(&self, view: &CompilationView) -> MatchResult {
        match self {
            PatternCheck::Singleton(check) => check.evaluate(view),
            PatternCheck::FactoryMethod(check) => check.evaluate(view),
            PatternCheck::Decorator(check) => check.evaluate(view),
            PatternCheck::Flyweight(check) => check.evaluate(view),
        }
    }
}

impl<'a> From<SingletonCheck<'a>> for PatternCheck<'a> {
    fn from(check: SingletonCheck<'a>) -> Self {
        PatternCheck::Singleton(check)
    }
}

impl<'a> From<FactoryMethodCheck<'a>> for PatternCheck<'a> {
    fn from(check: FactoryMethodCheck<'a>) -> Self {
        PatternCheck::FactoryMethod(check)
    }
}

impl<'a> From<DecoratorCheck<'a>> for PatternCheck<'a> {
    fn from(check: DecoratorCheck<'a>) -> Self {
        PatternCheck::Decorator(check)
    }
}

impl<'a> From<FlyweightCheck<'a>> for PatternCheck<'a> {
    fn from(check: FlyweightCheck<'a>) -> Self {
        PatternCheck::Flyweight(check)
    }
}
