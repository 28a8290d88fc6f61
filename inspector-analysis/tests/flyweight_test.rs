//! Flyweight detection, with and without a semantic model.

use inspector_analysis::patterns::flyweight::{has_flyweight_collection, has_get_flyweight_method};
use inspector_analysis::patterns::{FlyweightContext, UnsupportedReason, Verdict};
use inspector_analysis::{AnalysisHost, CompilationView, DesignPattern};
use inspector_core::traits::CancellationToken;

const FACTORY: &str = r#"using System;
using System.Collections.Generic;
using System.Linq;

namespace EmulatorProject.DesignPatterns.Flyweight
{
    public class FlyweightFactory
    {
        private List<Flyweight> flyweights = new List<Flyweight>();

        public FlyweightFactory(params Car[] args)
        {
            foreach (var elem in args)
            {
                flyweights.Add(new Flyweight(elem));
            }
        }

        public string getKey(Car key)
        {
            List<string> elements = new List<string>();

            elements.Add(key.Model);
            elements.Add(key.Color);

            if (key.Owner != null && key.Number != null)
            {
                elements.Add(key.Number);
            }

            return string.Join("_", elements);
        }

        public Flyweight GetFlyweight(Car sharedState)
        {
            string key = getKey(sharedState);

            if (flyweights.Where(t => t.getFlyweightKey() == key).Count() == 0)
            {
                Console.WriteLine("FlyweightFactory: Can't find a flyweight, creating new one.");
                flyweights.Add(new Flyweight(sharedState));
            }
            else
            {
                Console.WriteLine("FlyweightFactory: Reusing existing flyweight.");
            }
            return flyweights.Where(t => t.getFlyweightKey() == key).FirstOrDefault();
        }
    }
}
"#;

fn factory_view() -> CompilationView {
    CompilationView::from_sources([("Flyweight/FlyweightFactory.cs", FACTORY)]).unwrap()
}

#[test]
fn factory_pool_and_accessor_are_reported() {
    let view = factory_view();
    let report = AnalysisHost::default().run(&view, &CancellationToken::new());
    let fired: Vec<(&str, Option<&str>)> = report
        .for_pattern(DesignPattern::Flyweight)
        .map(|d| (d.check.as_str(), d.evidence.as_deref()))
        .collect();
    assert_eq!(
        fired,
        vec![
            ("HasFlyweightCollection", Some("Flyweight")),
            ("HasGetFlyweightMethod", Some("Flyweight")),
        ]
    );
    assert!(report
        .for_pattern(DesignPattern::Flyweight)
        .all(|d| d.rule_id == "FlyweightPatternAnalyzer"));
}

#[test]
fn arrays_count_as_collections() {
    let view = CompilationView::from_sources([(
        "Pool.cs",
        r#"public class Pool
        {
            private Glyph[] glyphs;
            public Glyph Get(int i)
            {
                if (glyphs[i] == null) { glyphs[i] = new Glyph(); }
                return glyphs[i];
            }
        }"#,
    )])
    .unwrap();
    let pool = view.types().next().unwrap();
    let field = pool.fields().next().unwrap();
    let collection = has_flyweight_collection(field, &view);
    assert!(collection.matched());
    assert_eq!(collection.evidence.as_deref(), Some("Glyph"));

    let context = FlyweightContext::collect(pool, &view);
    let get = pool.methods().next().unwrap();
    assert!(has_get_flyweight_method(get, &context).matched());
}

#[test]
fn scalars_are_not_pools() {
    let view = CompilationView::from_sources([(
        "Counter.cs",
        "public class Counter { private int count; private string name; }",
    )])
    .unwrap();
    let counter = view.types().next().unwrap();
    for field in counter.fields() {
        assert_eq!(has_flyweight_collection(field, &view).verdict, Verdict::NoMatch);
    }
}

#[test]
fn without_semantics_nothing_is_reported() {
    let trees = factory_view().trees().to_vec();
    let view = CompilationView::without_semantics(trees);
    let factory = view.types().next().unwrap();
    let field = factory.fields().next().unwrap();
    assert_eq!(
        has_flyweight_collection(field, &view).verdict,
        Verdict::Unsupported(UnsupportedReason::NoSemanticModel)
    );

    let report = AnalysisHost::default().run(&view, &CancellationToken::new());
    assert_eq!(report.count_for(DesignPattern::Flyweight), 0);
    assert!(report.failures.is_empty());
}
