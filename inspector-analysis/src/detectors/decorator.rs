//! Decorator orchestrator.
//!
//! The class verdict threads the reference type found by `HasAbstractClass`
//! into the field and constructor checks through a `DecoratorContext` owned
//! by this one evaluation.

use super::report_check;
use super::traits::PatternAnalyzer;
use crate::compilation::CompilationView;
use crate::engine::context::{AnalysisContext, DeclarationNode, NodeContext, SyntaxKind};
use crate::patterns::{DecoratorCheck, DecoratorContext, DesignPattern, MatchResult, PatternDispatcher};
use crate::syntax::TypeDeclaration;

pub struct DecoratorAnalyzer;

impl PatternAnalyzer for DecoratorAnalyzer {
    fn pattern(&self) -> DesignPattern {
        DesignPattern::Decorator
    }

    fn initialize(&self, context: &mut AnalysisContext) {
        context.register_syntax_node_action(SyntaxKind::Class, analyze_class);
        context.register_syntax_node_action(SyntaxKind::LocalDeclaration, analyze_statement);
    }
}

/// `HasAbstractClass`, then `HasPrivateStaticField` and `HasConstructor`
/// against the reference type it found. Evidence is the reference type.
pub fn decorator_verdict(ty: &TypeDeclaration, view: &CompilationView) -> MatchResult {
    let mut discovery = PatternDispatcher::new();
    discovery.bind(DecoratorCheck::HasAbstractClass(ty));
    if !discovery.run(view) {
        return MatchResult::not_found();
    }
    let context = discovery
        .last_result()
        .map(DecoratorContext::from_result)
        .unwrap_or_default();
    let Some(reference) = context.reference_type() else {
        return MatchResult::not_found();
    };

    let mut dispatcher = PatternDispatcher::new();
    for check in [
        DecoratorCheck::HasPrivateStaticField(ty, &context),
        DecoratorCheck::HasConstructor(ty, &context),
    ] {
        dispatcher.bind(check);
        if !dispatcher.run(view) {
            return MatchResult::not_found();
        }
    }
    MatchResult::found(ty.identifier_location.clone()).with_evidence(reference)
}

fn analyze_class(context: &NodeContext<'_>) {
    let DeclarationNode::Type(ty) = context.node else {
        return;
    };
    let verdict = decorator_verdict(ty, context.view);
    if let Some(location) = verdict.location {
        context.report(DesignPattern::Decorator, "Decorator", &ty.identifier, location, verdict.evidence);
    }
}

fn analyze_statement(context: &NodeContext<'_>) {
    if !context.include_partial() {
        return;
    }
    let DeclarationNode::LocalDeclaration(local) = context.node else {
        return;
    };
    let subject = local
        .variables
        .first()
        .map_or("<local>", |variable| variable.identifier.as_str());
    report_check(context, DecoratorCheck::AnalyzeStatement(local), subject);
}
