//! Outcome of a single check.

use serde::{Deserialize, Serialize};

use crate::parsers::types::Location;

/// Why a check could not decide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum UnsupportedReason {
    /// The compilation carries no semantic model.
    NoSemanticModel,
    /// The named type is neither declared nor known to the semantic model.
    UnresolvedType(String),
    /// The collection's element type could not be determined.
    UnresolvedElementType(String),
}

impl std::fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsupportedReason::NoSemanticModel => f.write_str("no semantic model"),
            UnsupportedReason::UnresolvedType(ty) => write!(f, "unresolved type {ty}"),
            UnsupportedReason::UnresolvedElementType(ty) => {
                write!(f, "unresolved element type of {ty}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Match,
    NoMatch,
    /// The check could not decide. Treated as a non-match.
    Unsupported(UnsupportedReason),
}

/// Result of evaluating one check against one declaration.
///
/// `evidence` names what the check matched on (the reference type of a
/// decorator, the product interface of a concrete product, ...). It is how
/// a fact found by one check reaches later checks for the same declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub verdict: Verdict,
    pub location: Option<Location>,
    pub evidence: Option<String>,
}

impl MatchResult {
    pub fn found(location: Location) -> Self {
        Self {
            verdict: Verdict::Match,
            location: Some(location),
            evidence: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            verdict: Verdict::NoMatch,
            location: None,
            evidence: None,
        }
    }

    pub fn unsupported(reason: UnsupportedReason) -> Self {
        Self {
            verdict: Verdict::Unsupported(reason),
            location: None,
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn matched(&self) -> bool {
        self.verdict == Verdict::Match
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.verdict, Verdict::Unsupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_is_not_a_match() {
        let result = MatchResult::unsupported(UnsupportedReason::NoSemanticModel);
        assert!(!result.matched());
        assert!(result.is_unsupported());
        assert!(result.location.is_none());
    }

    #[test]
    fn evidence_rides_along() {
        let result = MatchResult::found(Location::default()).with_evidence("Beverage");
        assert!(result.matched());
        assert_eq!(result.evidence.as_deref(), Some("Beverage"));
    }
}
