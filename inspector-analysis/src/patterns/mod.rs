//! Pattern checks: single-purpose structural predicates grouped by pattern,
//! the `MatchResult` they produce, and the dispatcher that runs them.
//!
//! Every check is also callable on its own, e.g.
//! `singleton::has_private_constructor(&ty)`.

pub mod check;
pub mod decorator;
pub mod dispatcher;
pub mod factory_method;
pub mod flyweight;
pub mod result;
pub mod singleton;

use serde::{Deserialize, Serialize};

pub use check::{Check, PatternCheck};
pub use decorator::{DecoratorCheck, DecoratorContext};
pub use dispatcher::PatternDispatcher;
pub use factory_method::FactoryMethodCheck;
pub use flyweight::{FlyweightCheck, FlyweightContext};
pub use result::{MatchResult, UnsupportedReason, Verdict};
pub use singleton::SingletonCheck;

/// The design patterns the analyzer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignPattern {
    Singleton,
    FactoryMethod,
    Decorator,
    Flyweight,
}

impl DesignPattern {
    pub const ALL: [DesignPattern; 4] = [
        DesignPattern::Singleton,
        DesignPattern::FactoryMethod,
        DesignPattern::Decorator,
        DesignPattern::Flyweight,
    ];

    /// Config and CLI name.
    pub fn name(&self) -> &'static str {
        match self {
            DesignPattern::Singleton => "singleton",
            DesignPattern::FactoryMethod => "factory_method",
            DesignPattern::Decorator => "decorator",
            DesignPattern::Flyweight => "flyweight",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DesignPattern::Singleton => "Singleton",
            DesignPattern::FactoryMethod => "Factory Method",
            DesignPattern::Decorator => "Decorator",
            DesignPattern::Flyweight => "Flyweight",
        }
    }

    /// Parses a config name; accepts the same spellings config validation does.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = inspector_core::config::pattern_config::normalize_pattern_name(name);
        Self::ALL.into_iter().find(|p| p.name() == normalized)
    }
}

impl std::fmt::Display for DesignPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
