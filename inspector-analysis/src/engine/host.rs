//! The analysis host: enumerates declaration nodes and feeds them to the
//! callbacks analyzers registered.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use inspector_core::config::InspectorConfig;
use inspector_core::errors::DetectionError;
use inspector_core::traits::{Cancellable, CancellationToken};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use super::context::{AnalysisContext, DeclarationNode, NodeContext, RegisteredAction, ReportOptions, SyntaxKind};
use super::report::{AnalysisReport, AnalyzerFailure};
use crate::compilation::CompilationView;
use crate::detectors::DetectorRegistry;
use crate::diagnostics::{DiagnosticBag, Severity};
use crate::patterns::DesignPattern;
use crate::syntax::statements::walk_statements;
use crate::syntax::{BodyNode, Expression, MemberDeclaration, SourceTree, Statement, TypeDeclaration};

/// One node to dispatch, with what its callbacks need to see.
#[derive(Clone, Copy)]
struct WorkItem<'a> {
    tree: &'a SourceTree,
    node: DeclarationNode<'a>,
    containing_type: Option<&'a TypeDeclaration>,
}

pub struct AnalysisHost {
    actions: Vec<RegisteredAction>,
    patterns: Vec<DesignPattern>,
    options: ReportOptions,
    parallel: bool,
    pool: Option<rayon::ThreadPool>,
}

impl AnalysisHost {
    /// Registers every analyzer in `registry` with default options.
    pub fn new(registry: DetectorRegistry) -> Self {
        let mut actions = Vec::new();
        for analyzer in registry.iter() {
            let mut context = AnalysisContext::for_pattern(analyzer.pattern());
            analyzer.initialize(&mut context);
            actions.extend(context.into_actions());
        }
        Self {
            actions,
            patterns: registry.patterns(),
            options: ReportOptions::default(),
            parallel: true,
            pool: None,
        }
    }

    pub fn from_config(config: &InspectorConfig) -> Result<Self, DetectionError> {
        let registry = DetectorRegistry::from_config(&config.patterns)?;

        let mut severity_overrides = FxHashMap::default();
        for (name, severity) in &config.patterns.severity_overrides {
            let pattern =
                DesignPattern::from_name(name).ok_or_else(|| DetectionError::UnknownPattern(name.clone()))?;
            match Severity::from_name(severity) {
                Some(severity) => {
                    severity_overrides.insert(pattern, severity);
                }
                None => tracing::warn!(pattern = %name, severity = %severity, "ignoring unknown severity"),
            }
        }
        let options = ReportOptions {
            min_severity: Severity::from_name(config.patterns.effective_min_severity())
                .unwrap_or(Severity::Hint),
            include_partial: config.output.effective_include_partial(),
            severity_overrides,
        };

        Self::new(registry)
            .with_options(options)
            .with_parallelism(config.analysis.effective_parallel(), config.analysis.effective_threads())
    }

    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets parallel dispatch. `threads == 0` uses rayon's global pool.
    pub fn with_parallelism(mut self, parallel: bool, threads: usize) -> Result<Self, DetectionError> {
        self.parallel = parallel;
        self.pool = if parallel && threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("inspector-worker-{i}"))
                .build()
                .map_err(|e| DetectionError::ThreadPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };
        Ok(self)
    }

    pub fn sequential(self) -> Self {
        Self {
            parallel: false,
            pool: None,
            ..self
        }
    }

    pub fn patterns(&self) -> &[DesignPattern] {
        &self.patterns
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Runs `op` on the configured pool, or on the caller's pool if none.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Runs every registered callback over every matching node in `view`.
    ///
    /// The token is checked before each node. Nodes already dispatched run
    /// to completion; a cancelled pass reports what it found so far.
    pub fn run(&self, view: &CompilationView, cancel: &CancellationToken) -> AnalysisReport {
        let start = Instant::now();
        let subscribed: FxHashSet<SyntaxKind> = self.actions.iter().map(|registered| registered.kind).collect();
        let items = collect_work(view, &subscribed);

        let bag = DiagnosticBag::new();
        let cancelled = AtomicBool::new(false);
        let failures: Mutex<Vec<AnalyzerFailure>> = Mutex::new(Vec::new());

        let process = |item: &WorkItem<'_>| {
            if cancel.is_cancelled() {
                cancelled.store(true, Ordering::Relaxed);
                return;
            }
            let context = NodeContext::new(
                item.node,
                item.tree,
                item.containing_type,
                view,
                &bag,
                &self.options,
            );
            let kind = item.node.kind();
            for registered in self.actions.iter().filter(|registered| registered.kind == kind) {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| (registered.action)(&context)));
                if let Err(payload) = outcome {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!(
                        pattern = registered.pattern.name(),
                        file = %item.tree.path,
                        message = %message,
                        "analyzer callback panicked"
                    );
                    let mut failures = failures.lock().unwrap_or_else(|e| e.into_inner());
                    failures.push(AnalyzerFailure {
                        pattern: registered.pattern,
                        file: item.tree.path.clone(),
                        message,
                    });
                }
            }
        };

        if self.parallel {
            self.install(|| items.par_iter().for_each(&process));
        } else {
            items.iter().for_each(&process);
        }

        let mut failures = failures.into_inner().unwrap_or_else(|e| e.into_inner());
        failures.sort_by(|a, b| (&a.file, a.pattern).cmp(&(&b.file, b.pattern)));
        let report = AnalysisReport {
            diagnostics: bag.into_sorted(),
            patterns: self.patterns.clone(),
            files_analyzed: view.trees().len(),
            files_with_syntax_errors: view.trees().iter().filter(|tree| tree.has_errors()).count(),
            declarations_visited: items.len(),
            cancelled: cancelled.load(Ordering::Relaxed) || cancel.is_cancelled(),
            duration_ms: start.elapsed().as_millis() as u64,
            failures,
            fingerprint: view.fingerprint(),
        };
        tracing::info!(
            files = report.files_analyzed,
            declarations = report.declarations_visited,
            diagnostics = report.diagnostics.len(),
            cancelled = report.cancelled,
            duration_ms = report.duration_ms,
            "detection pass complete"
        );
        report
    }
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new(DetectorRegistry::with_defaults())
    }
}

/// Enumerates every node of a subscribed kind, types first, then their
/// members, then locals and constructions inside member bodies.
fn collect_work<'a>(view: &'a CompilationView, subscribed: &FxHashSet<SyntaxKind>) -> Vec<WorkItem<'a>> {
    let wants_body = subscribed.contains(&SyntaxKind::LocalDeclaration)
        || subscribed.contains(&SyntaxKind::ObjectCreation);
    let mut items = Vec::new();
    for tree in view.trees() {
        for ty in &tree.types {
            let mut push = |node: DeclarationNode<'a>, containing_type: Option<&'a TypeDeclaration>| {
                if subscribed.contains(&node.kind()) {
                    items.push(WorkItem {
                        tree,
                        node,
                        containing_type,
                    });
                }
            };
            push(DeclarationNode::Type(ty), None);
            for member in &ty.members {
                let node = match member {
                    MemberDeclaration::Field(field) => DeclarationNode::Field(field),
                    MemberDeclaration::Constructor(ctor) => DeclarationNode::Constructor(ctor),
                    MemberDeclaration::Method(method) => DeclarationNode::Method(method),
                    MemberDeclaration::Property(property) => DeclarationNode::Property(property),
                };
                push(node, Some(ty));

                let Some(body) = member.body().filter(|_| wants_body) else {
                    continue;
                };
                walk_statements(&body.statements, &mut |body_node: BodyNode<'a>| match body_node {
                    BodyNode::Statement(Statement::LocalDeclaration(local)) => {
                        push(DeclarationNode::LocalDeclaration(local), Some(ty));
                    }
                    BodyNode::Expression(Expression::ObjectCreation(creation)) => {
                        push(DeclarationNode::ObjectCreation(creation), Some(ty));
                    }
                    _ => {}
                });
            }
        }
    }
    items
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
        public class Singleton
        {
            private static Singleton _instance;
            private Singleton() { }
            public static Singleton Instance() { return _instance; }
        }
    "#;

    #[test]
    fn enumerates_only_subscribed_kinds() {
        let view = CompilationView::from_sources([(
            "Program.cs",
            "class Program { int _x; void Run() { var a = new A(); if (a == null) { var b = new B(); } } }",
        )])
        .unwrap();
        let all: FxHashSet<SyntaxKind> = [
            SyntaxKind::Class,
            SyntaxKind::Field,
            SyntaxKind::Method,
            SyntaxKind::LocalDeclaration,
            SyntaxKind::ObjectCreation,
        ]
        .into_iter()
        .collect();
        let kinds: Vec<SyntaxKind> = collect_work(&view, &all).iter().map(|item| item.node.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Class,
                SyntaxKind::Field,
                SyntaxKind::Method,
                SyntaxKind::LocalDeclaration,
                SyntaxKind::ObjectCreation,
                SyntaxKind::LocalDeclaration,
                SyntaxKind::ObjectCreation,
            ]
        );

        let classes_only: FxHashSet<SyntaxKind> = [SyntaxKind::Class].into_iter().collect();
        assert_eq!(collect_work(&view, &classes_only).len(), 1);
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let view = CompilationView::from_sources([("Singleton.cs", SOURCE)]).unwrap();
        let token = CancellationToken::new();
        let parallel = AnalysisHost::default().run(&view, &token);
        let sequential = AnalysisHost::default().sequential().run(&view, &token);
        assert_eq!(parallel.diagnostics, sequential.diagnostics);
        assert_eq!(parallel.count_for(DesignPattern::Singleton), 1);
        assert!(!parallel.cancelled);
    }

    #[test]
    fn cancelled_token_skips_dispatch() {
        let view = CompilationView::from_sources([("Singleton.cs", SOURCE)]).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let report = AnalysisHost::default().run(&view, &token);
        assert!(report.cancelled);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn min_severity_filters_reports() {
        let view = CompilationView::from_sources([("Singleton.cs", SOURCE)]).unwrap();
        let options = ReportOptions {
            min_severity: Severity::Warning,
            ..Default::default()
        };
        let report = AnalysisHost::default()
            .with_options(options)
            .run(&view, &CancellationToken::new());
        assert!(report.diagnostics.is_empty());
    }
}
