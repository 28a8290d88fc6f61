//! Flyweight orchestrator.

use super::report_check;
use super::traits::PatternAnalyzer;
use crate::engine::context::{AnalysisContext, DeclarationNode, NodeContext, SyntaxKind};
use crate::patterns::{DesignPattern, FlyweightCheck, FlyweightContext};

pub struct FlyweightAnalyzer;

impl PatternAnalyzer for FlyweightAnalyzer {
    fn pattern(&self) -> DesignPattern {
        DesignPattern::Flyweight
    }

    fn initialize(&self, context: &mut AnalysisContext) {
        context.register_syntax_node_action(SyntaxKind::Field, analyze_field);
        context.register_syntax_node_action(SyntaxKind::Method, analyze_method);
    }
}

fn analyze_field(context: &NodeContext<'_>) {
    if let DeclarationNode::Field(field) = context.node {
        report_check(context, FlyweightCheck::HasFlyweightCollection(field), field.first_name());
    }
}

fn analyze_method(context: &NodeContext<'_>) {
    let DeclarationNode::Method(method) = context.node else {
        return;
    };
    let Some(owner) = context.containing_type else {
        return;
    };
    let flyweights = FlyweightContext::collect(owner, context.view);
    report_check(
        context,
        FlyweightCheck::HasGetFlyweightMethod(method, &flyweights),
        &method.identifier,
    );
}
