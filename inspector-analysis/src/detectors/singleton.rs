//! Singleton orchestrator: one verdict per class.

use super::traits::PatternAnalyzer;
use crate::compilation::CompilationView;
use crate::engine::context::{AnalysisContext, DeclarationNode, NodeContext, SyntaxKind};
use crate::patterns::{singleton, DesignPattern, MatchResult, PatternDispatcher};
use crate::syntax::TypeDeclaration;

pub struct SingletonAnalyzer;

impl PatternAnalyzer for SingletonAnalyzer {
    fn pattern(&self) -> DesignPattern {
        DesignPattern::Singleton
    }

    fn initialize(&self, context: &mut AnalysisContext) {
        context.register_syntax_node_action(SyntaxKind::Class, analyze_class);
    }
}

/// All three Singleton checks must hold for the same type.
pub fn singleton_verdict(ty: &TypeDeclaration, view: &CompilationView) -> MatchResult {
    let mut dispatcher = PatternDispatcher::new();
    let mut location = None;
    for check in singleton::checks(ty) {
        dispatcher.bind(check);
        if !dispatcher.run(view) {
            return MatchResult::not_found();
        }
        location = dispatcher.location().cloned();
    }
    location.map_or_else(MatchResult::not_found, MatchResult::found)
}

fn analyze_class(context: &NodeContext<'_>) {
    let DeclarationNode::Type(ty) = context.node else {
        return;
    };
    let verdict = singleton_verdict(ty, context.view);
    if let Some(location) = verdict.location {
        context.report(DesignPattern::Singleton, "Singleton", &ty.identifier, location, None);
    }
}
