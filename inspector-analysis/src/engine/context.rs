//! What analyzers see: syntax kinds they can subscribe to, the node handed
//! to each callback, and the registration surface.

use rustc_hash::FxHashMap;

use crate::compilation::CompilationView;
use crate::diagnostics::{descriptor_for, Diagnostic, DiagnosticSink, Severity};
use crate::parsers::types::Location;
use crate::patterns::DesignPattern;
use crate::syntax::{
    ConstructorDeclaration, FieldDeclaration, LocalDeclaration, MethodDeclaration, ObjectCreation,
    PropertyDeclaration, SourceTree, TypeDeclaration,
};

/// Declaration kinds a callback can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Classes, structs, and records.
    Class,
    Interface,
    Field,
    Constructor,
    Method,
    Property,
    LocalDeclaration,
    ObjectCreation,
}

/// One occurrence of a subscribed kind.
#[derive(Debug, Clone, Copy)]
pub enum DeclarationNode<'a> {
    Type(&'a TypeDeclaration),
    Field(&'a FieldDeclaration),
    Constructor(&'a ConstructorDeclaration),
    Method(&'a MethodDeclaration),
    Property(&'a PropertyDeclaration),
    LocalDeclaration(&'a LocalDeclaration),
    ObjectCreation(&'a ObjectCreation),
}

impl DeclarationNode<'_> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            DeclarationNode::Type(ty) if ty.is_interface() => SyntaxKind::Interface,
            DeclarationNode::Type(_) => SyntaxKind::Class,
            DeclarationNode::Field(_) => SyntaxKind::Field,
            DeclarationNode::Constructor(_) => SyntaxKind::Constructor,
            DeclarationNode::Method(_) => SyntaxKind::Method,
            DeclarationNode::Property(_) => SyntaxKind::Property,
            DeclarationNode::LocalDeclaration(_) => SyntaxKind::LocalDeclaration,
            DeclarationNode::ObjectCreation(_) => SyntaxKind::ObjectCreation,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            DeclarationNode::Type(ty) => &ty.location,
            DeclarationNode::Field(field) => &field.location,
            DeclarationNode::Constructor(ctor) => &ctor.location,
            DeclarationNode::Method(method) => &method.location,
            DeclarationNode::Property(property) => &property.location,
            DeclarationNode::LocalDeclaration(local) => &local.location,
            DeclarationNode::ObjectCreation(creation) => &creation.location,
        }
    }
}

/// How findings are graded and filtered.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub min_severity: Severity,
    /// Report statement-level signals (`DeclarationWithFactoryMethod`,
    /// `AnalyzeStatement`) as well as declaration verdicts.
    pub include_partial: bool,
    pub severity_overrides: FxHashMap<DesignPattern, Severity>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            min_severity: Severity::Hint,
            include_partial: true,
            severity_overrides: FxHashMap::default(),
        }
    }
}

impl ReportOptions {
    pub fn severity_for(&self, pattern: DesignPattern) -> Severity {
        self.severity_overrides
            .get(&pattern)
            .copied()
            .unwrap_or(descriptor_for(pattern).default_severity)
    }
}

/// Passed to every callback invocation. Valid for that invocation only.
pub struct NodeContext<'a> {
    pub node: DeclarationNode<'a>,
    pub tree: &'a SourceTree,
    /// The type declaring the node. `None` for type nodes themselves.
    pub containing_type: Option<&'a TypeDeclaration>,
    pub view: &'a CompilationView,
    sink: &'a dyn DiagnosticSink,
    options: &'a ReportOptions,
}

impl<'a> NodeContext<'a> {
    pub fn new(
        node: DeclarationNode<'a>,
        tree: &'a SourceTree,
        containing_type: Option<&'a TypeDeclaration>,
        view: &'a CompilationView,
        sink: &'a dyn DiagnosticSink,
        options: &'a ReportOptions,
    ) -> Self {
        Self {
            node,
            tree,
            containing_type,
            view,
            sink,
            options,
        }
    }

    pub fn include_partial(&self) -> bool {
        self.options.include_partial
    }

    /// Reports a finding for `pattern`, named after `check`, about `subject`.
    /// Findings below the configured minimum severity are dropped here.
    pub fn report(
        &self,
        pattern: DesignPattern,
        check: &str,
        subject: &str,
        location: Location,
        evidence: Option<String>,
    ) {
        let severity = self.options.severity_for(pattern);
        if !severity.at_least(self.options.min_severity) {
            return;
        }
        let descriptor = descriptor_for(pattern);
        self.sink.report(Diagnostic {
            rule_id: descriptor.id.to_string(),
            pattern,
            check: check.to_string(),
            severity,
            message: descriptor.format_message(subject, check),
            location,
            evidence,
        });
    }
}

pub type NodeAction = Box<dyn Fn(&NodeContext<'_>) + Send + Sync>;

pub(crate) struct RegisteredAction {
    pub pattern: DesignPattern,
    pub kind: SyntaxKind,
    pub action: NodeAction,
}

/// Registration surface handed to `PatternAnalyzer::initialize`.
pub struct AnalysisContext {
    pattern: DesignPattern,
    actions: Vec<RegisteredAction>,
}

impl AnalysisContext {
    pub(crate) fn for_pattern(pattern: DesignPattern) -> Self {
        Self {
            pattern,
            actions: Vec::new(),
        }
    }

    /// Runs `action` once for every node of `kind` in the compilation.
    pub fn register_syntax_node_action<F>(&mut self, kind: SyntaxKind, action: F)
    where
        F: Fn(&NodeContext<'_>) + Send + Sync + 'static,
    {
        self.actions.push(RegisteredAction {
            pattern: self.pattern,
            kind,
            action: Box::new(action),
        });
    }

    pub fn registered_kinds(&self) -> Vec<SyntaxKind> {
        self.actions.iter().map(|registered| registered.kind).collect()
    }

    pub(crate) fn into_actions(self) -> Vec<RegisteredAction> {
        self.actions
    }
}
