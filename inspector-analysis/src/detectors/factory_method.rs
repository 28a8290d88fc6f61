//! Factory Method orchestrator. Every check is its own signal and is
//! reported under its own name.

use super::report_check;
use super::traits::PatternAnalyzer;
use crate::engine::context::{AnalysisContext, DeclarationNode, NodeContext, SyntaxKind};
use crate::patterns::{DesignPattern, FactoryMethodCheck};

pub struct FactoryMethodAnalyzer;

impl PatternAnalyzer for FactoryMethodAnalyzer {
    fn pattern(&self) -> DesignPattern {
        DesignPattern::FactoryMethod
    }

    fn initialize(&self, context: &mut AnalysisContext) {
        context.register_syntax_node_action(SyntaxKind::Interface, analyze_interface);
        context.register_syntax_node_action(SyntaxKind::Class, analyze_class);
        context.register_syntax_node_action(SyntaxKind::Method, analyze_method);
        context.register_syntax_node_action(SyntaxKind::LocalDeclaration, analyze_local);
    }
}

fn analyze_interface(context: &NodeContext<'_>) {
    if let DeclarationNode::Type(ty) = context.node {
        report_check(context, FactoryMethodCheck::IsProductInterface(ty), &ty.identifier);
    }
}

fn analyze_class(context: &NodeContext<'_>) {
    if let DeclarationNode::Type(ty) = context.node {
        report_check(context, FactoryMethodCheck::IsConcreteProduct(ty), &ty.identifier);
    }
}

fn analyze_method(context: &NodeContext<'_>) {
    let DeclarationNode::Method(method) = context.node else {
        return;
    };
    report_check(context, FactoryMethodCheck::IsAbstractFactoryMethod(method), &method.identifier);
    report_check(
        context,
        FactoryMethodCheck::OverridesAbstractFactoryMethod(method),
        &method.identifier,
    );
}

fn analyze_local(context: &NodeContext<'_>) {
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
    report_check(context, FactoryMethodCheck::DeclarationWithFactoryMethod(local), subject);
}
