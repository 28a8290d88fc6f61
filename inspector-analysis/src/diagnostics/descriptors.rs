//! Static rule descriptors, one per pattern.

use super::types::Severity;
use crate::patterns::DesignPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// `{0}` is replaced by the declaration name, `{1}` by the check name.
    pub message_format: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
}

impl DiagnosticDescriptor {
    pub fn format_message(&self, subject: &str, check: &str) -> String {
        self.message_format
            .replace("{0}", subject)
            .replace("{1}", check)
    }
}

pub const SINGLETON: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "SingletonPatternAnalyzer",
    title: "Singleton pattern",
    message_format: "'{0}' implements the Singleton pattern",
    category: "Creational design pattern",
    default_severity: Severity::Info,
};

pub const FACTORY_METHOD: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "FactoryMethodPatternAnalyzer",
    title: "Factory Method pattern",
    message_format: "'{0}' takes part in the Factory Method pattern ({1})",
    category: "Creational design pattern",
    default_severity: Severity::Info,
};

pub const DECORATOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "DecoratorPatternAnalyzer",
    title: "Decorator pattern",
    message_format: "'{0}' takes part in the Decorator pattern ({1})",
    category: "Structural design pattern",
    default_severity: Severity::Info,
};

pub const FLYWEIGHT: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "FlyweightPatternAnalyzer",
    title: "Flyweight pattern",
    message_format: "'{0}' takes part in the Flyweight pattern ({1})",
    category: "Structural design pattern",
    default_severity: Severity::Info,
};

pub fn descriptor_for(pattern: DesignPattern) -> &'static DiagnosticDescriptor {
    match pattern {
        DesignPattern::Singleton => &SINGLETON,
        DesignPattern::FactoryMethod => &FACTORY_METHOD,
        DesignPattern::Decorator => &DECORATOR,
        DesignPattern::Flyweight => &FLYWEIGHT,
    }
}
