//! Decorator detection over the beverage example.

use inspector_analysis::detectors::decorator::decorator_verdict;
use inspector_analysis::patterns::decorator::analyze_statement;
use inspector_analysis::syntax::Statement;
use inspector_analysis::{AnalysisHost, CompilationView, DesignPattern};
use inspector_core::traits::CancellationToken;

const BEVERAGE: &str = r#"namespace EmulatorProject.DesignPatterns.Decorator
{
    public abstract class Beverage
    {
        protected string baseDescription = "Unknown beverage";

        public virtual string Description
        {
            get { return baseDescription; }
        }

        public abstract double Cost();
    }
}
"#;

const CONDIMENTS: &str = r#"namespace EmulatorProject.DesignPatterns.Decorator
{
    public class Milk : Beverage
    {
        private Beverage baseBeverage;

        public Milk(Beverage beverage)
        {
            baseBeverage = beverage;
        }

        public override double Cost()
        {
            return 0.10 + baseBeverage.Cost();
        }
    }

    public class Soy : Beverage
    {
        private Beverage baseBeverage;

        public Soy(Beverage beverage)
        {
            baseBeverage = beverage;
        }

        public override double Cost()
        {
            return 0.15 + baseBeverage.Cost();
        }
    }

    public class Espresso : Beverage
    {
        public Espresso()
        {
            baseDescription = "Espresso";
        }

        public override double Cost()
        {
            return 1.99;
        }
    }
}
"#;

const CLIENT: &str = r#"namespace EmulatorProject.DesignPatterns.Decorator
{
    public class Test
    {
        public Test()
        {
            Beverage beverage = new Milk(new Soy(new Espresso()));
            var cost = beverage.Cost();
        }
    }
}
"#;

fn view() -> CompilationView {
    CompilationView::from_sources([
        ("Decorator/Beverage.cs", BEVERAGE),
        ("Decorator/Condiments.cs", CONDIMENTS),
        ("Decorator/Test.cs", CLIENT),
    ])
    .unwrap()
}

fn first_local(source: &str) -> inspector_analysis::syntax::LocalDeclaration {
    let view = CompilationView::from_sources([("Snippet.cs", source)]).unwrap();
    let method = view.types().next().unwrap().methods().next().unwrap();
    let body = method.body.as_ref().unwrap();
    body.statements
        .iter()
        .find_map(|statement| match statement {
            Statement::LocalDeclaration(local) => Some(local.clone()),
            _ => None,
        })
        .unwrap()
}

#[test]
fn wrapping_classes_are_decorators() {
    let view = view();
    let verdicts: Vec<(&str, bool)> = view
        .types()
        .map(|ty| (ty.identifier.as_str(), decorator_verdict(ty, &view).matched()))
        .collect();
    assert_eq!(
        verdicts,
        vec![
            ("Beverage", false),
            ("Milk", true),
            ("Soy", true),
            ("Espresso", false),
            ("Test", false),
        ]
    );

    let milk = view.types_named("Milk").next().unwrap();
    let verdict = decorator_verdict(milk, &view);
    assert_eq!(verdict.location.as_ref(), Some(&milk.identifier_location));
    assert_eq!(verdict.evidence.as_deref(), Some("Beverage"));
}

#[test]
fn host_reports_classes_and_the_client_statement() {
    let view = view();
    let report = AnalysisHost::default().run(&view, &CancellationToken::new());
    let mut fired: Vec<(&str, &str)> = report
        .for_pattern(DesignPattern::Decorator)
        .map(|d| (d.check.as_str(), d.location.file.as_str()))
        .collect();
    fired.sort();
    assert_eq!(
        fired,
        vec![
            ("AnalyzeStatement", "Decorator/Test.cs"),
            ("Decorator", "Decorator/Condiments.cs"),
            ("Decorator", "Decorator/Condiments.cs"),
        ]
    );
    let statement = report
        .for_pattern(DesignPattern::Decorator)
        .find(|d| d.check == "AnalyzeStatement")
        .unwrap();
    assert_eq!(statement.evidence.as_deref(), Some("Milk"));
    assert!(statement.message.contains("beverage"));
}

#[test]
fn a_lone_abstract_base_is_not_enough() {
    let view = CompilationView::from_sources([(
        "Shape.cs",
        "public class Circle : Shape { private Shape inner; public Circle(Shape s) { inner = s; } }",
    )])
    .unwrap();
    let circle = view.types().next().unwrap();
    assert!(!decorator_verdict(circle, &view).matched());
}

#[test]
fn wrapping_statements() {
    let wrap = |expression: &str| {
        let source = format!("class Client {{ void Run() {{ var drink = {expression}; }} }}");
        analyze_statement(&first_local(&source)).matched()
    };
    assert!(wrap("new Milk(new Soy())"));
    assert!(wrap("new Milk(new Soy(new Espresso()))"));
    assert!(wrap("new Milk(new Soy(espresso))"));
    assert!(wrap("new Milk(new Soy(Brew()))"));
    assert!(!wrap("new Milk(new Soy(\"x\"))"));
    assert!(!wrap("new Milk(new Soy(new Espresso(2)))"));
    assert!(!wrap("new Milk()"));
    assert!(!wrap("new Milk(other)"));
    assert!(!wrap("Make(new Soy())"));
}

#[test]
fn wrapping_inside_property_getters_is_reported() {
    let cafe = r#"
public class Cafe
{
    public Beverage House
    {
        get { var b = new Milk(new Soy()); return b; }
    }

    public Beverage Plain => Make();

    private Beverage Make() { return new Espresso(); }
}
"#;
    let view = CompilationView::from_sources([
        ("Decorator/Beverage.cs", BEVERAGE),
        ("Decorator/Condiments.cs", CONDIMENTS),
        ("Decorator/Cafe.cs", cafe),
    ])
    .unwrap();
    let report = AnalysisHost::default().run(&view, &CancellationToken::new());
    let statements: Vec<_> = report
        .for_pattern(DesignPattern::Decorator)
        .filter(|d| d.check == "AnalyzeStatement")
        .collect();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].location.file, "Decorator/Cafe.cs");
    assert_eq!(statements[0].evidence.as_deref(), Some("Milk"));
}

const SHAPES: &str = r#"
public abstract class Shape
{
    public abstract void Draw();
}
"#;

const BORDER: &str = r#"
public class Border : Shape
{
    private Shape inner;

    public Border(Shape shape)
    {
        inner = shape;
    }

    public override void Draw() { inner.Draw(); }
}
"#;

const CREAM: &str = r#"
public class Cream : Beverage
{
    private Beverage inner;

    public Cream(Beverage beverage)
    {
        inner = beverage;
    }

    public override double Cost() { return 0.2 + inner.Cost(); }
}
"#;

fn class_findings(report: &inspector_analysis::AnalysisReport) -> Vec<(String, Option<String>)> {
    let mut found: Vec<_> = report
        .for_pattern(DesignPattern::Decorator)
        .filter(|d| d.check == "Decorator")
        .map(|d| (d.message.clone(), d.evidence.clone()))
        .collect();
    found.sort();
    found
}

#[test]
fn parallel_runs_keep_each_family_apart() {
    let view = CompilationView::from_sources([
        ("Beverage.cs", BEVERAGE),
        ("Cream.cs", CREAM),
        ("Shape.cs", SHAPES),
        ("Border.cs", BORDER),
    ])
    .unwrap();

    let sequential = class_findings(&AnalysisHost::default().sequential().run(&view, &CancellationToken::new()));
    assert_eq!(sequential.len(), 2);
    for (message, evidence) in &sequential {
        let expected = if message.contains("'Cream'") { "Beverage" } else { "Shape" };
        assert!(message.contains("'Cream'") || message.contains("'Border'"), "{message}");
        assert_eq!(evidence.as_deref(), Some(expected), "{message}");
    }

    let host = AnalysisHost::default().with_parallelism(true, 4).unwrap();
    for _ in 0..16 {
        let parallel = class_findings(&host.run(&view, &CancellationToken::new()));
        assert_eq!(parallel, sequential);
    }
}
