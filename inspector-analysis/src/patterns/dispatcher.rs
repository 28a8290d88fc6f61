//! The strategy holder: one bound check at a time, run on demand.

use super::check::{Check, PatternCheck};
use super::result::MatchResult;
use crate::compilation::CompilationView;
use crate::parsers::types::Location;

#[derive(Debug, Clone, Default)]
enum State<'a> {
    #[default]
    Idle,
    Bound(PatternCheck<'a>),
}

/// Holds at most one check. `run` executes it against the view and keeps
/// the location of a successful result; a failed run clears it.
///
/// A dispatcher belongs to one orchestrator invocation. It is cheap to
/// create and must not be shared across declarations.
#[derive(Debug, Clone, Default)]
pub struct PatternDispatcher<'a> {
    state: State<'a>,
    location: Option<Location>,
    last: Option<MatchResult>,
}

impl<'a> PatternDispatcher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `check`, replacing whatever was bound before.
    pub fn bind(&mut self, check: impl Into<PatternCheck<'a>>) -> &mut Self {
        self.state = State::Bound(check.into());
        self.location = None;
        self.last = None;
        self
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, State::Bound(_))
    }

    /// Name of the bound check, if any.
    pub fn bound_check(&self) -> Option<&'static str> {
        match &self.state {
            State::Idle => None,
            State::Bound(check) => Some(check.name()),
        }
    }

    /// Runs the bound check. Idle dispatchers report `false` and no location.
    pub fn run(&mut self, view: &CompilationView) -> bool {
        let State::Bound(check) = &self.state else {
            self.location = None;
            return false;
        };
        let result = check.evaluate(view);
        tracing::debug!(
            check = check.name(),
            verdict = ?result.verdict,
            "check evaluated"
        );
        let matched = result.matched();
        self.location = if matched { result.location.clone() } else { None };
        self.last = Some(result);
        matched
    }

    /// Location recorded by the last successful run.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn last_result(&self) -> Option<&MatchResult> {
        self.last.as_ref()
    }

    /// Evidence of the last run, matched or not.
    pub fn evidence(&self) -> Option<&str> {
        self.last.as_ref()?.evidence.as_deref()
    }
}
