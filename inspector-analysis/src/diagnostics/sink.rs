//! Diagnostic collection.

use std::sync::Mutex;

use super::types::Diagnostic;

/// Receives diagnostics from concurrently running callbacks.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Thread-safe in-memory sink.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    items: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the bag, returning diagnostics in a deterministic order.
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut items = self.items.into_inner().unwrap_or_else(|e| e.into_inner());
        items.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        items.dedup();
        items
    }
}

impl DiagnosticSink for DiagnosticBag {
    fn report(&self, diagnostic: Diagnostic) {
        // Poisoned locks still hold every diagnostic reported before the panic.
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::parsers::types::{Location, Position, Range};
    use crate::patterns::DesignPattern;

    fn at(file: &str, line: u32, check: &str) -> Diagnostic {
        Diagnostic {
            rule_id: "SingletonPatternAnalyzer".to_string(),
            pattern: DesignPattern::Singleton,
            check: check.to_string(),
            severity: Severity::Info,
            message: String::new(),
            location: Location::new(
                file,
                Range {
                    start: Position { line, column: 0 },
                    end: Position { line, column: 4 },
                },
            ),
            evidence: None,
        }
    }

    #[test]
    fn sorted_and_deduplicated() {
        let bag = DiagnosticBag::new();
        bag.report(at("b.cs", 1, "Singleton"));
        bag.report(at("a.cs", 9, "Singleton"));
        bag.report(at("a.cs", 2, "Singleton"));
        bag.report(at("a.cs", 2, "Singleton"));
        assert_eq!(bag.len(), 4);

        let sorted = bag.into_sorted();
        let keys: Vec<_> = sorted
            .iter()
            .map(|d| (d.location.file.as_str(), d.location.range.start.line))
            .collect();
        assert_eq!(keys, vec![("a.cs", 2), ("a.cs", 9), ("b.cs", 1)]);
    }
}
