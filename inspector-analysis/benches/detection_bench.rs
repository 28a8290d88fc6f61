//! Detection benchmarks
//!
//! Parse, compilation construction, and full detection passes over a
//! synthetic project with one instance of every pattern per module.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use inspector_analysis::parsers::CSharpParser;
use inspector_analysis::{AnalysisHost, AnalysisPipeline, CompilationView};
use inspector_core::config::InspectorConfig;
use inspector_core::traits::CancellationToken;
use std::fs;
use tempfile::TempDir;

fn module_source(index: usize) -> String {
    format!(
        r#"using System.Collections.Generic;

namespace Bench.Module{index}
{{
    public class Registry{index}
    {{
        private static Registry{index} _instance;
        private Registry{index}() {{ }}
        public static Registry{index} GetInstance()
        {{
            if (_instance == null) {{ _instance = new Registry{index}(); }}
            return _instance;
        }}
    }}

    public interface IProduct{index} {{ string Name(); }}

    public abstract class Creator{index}
    {{
        public abstract IProduct{index} Create();
        public string Describe()
        {{
            var product = Create();
            return product.Name();
        }}
    }}

    public class Product{index} : IProduct{index}
    {{
        public string Name() {{ return "product"; }}
    }}

    public class ConcreteCreator{index} : Creator{index}
    {{
        public override IProduct{index} Create() {{ return new Product{index}(); }}
    }}

    public abstract class Stream{index} {{ public abstract int Read(); }}

    public class Buffered{index} : Stream{index}
    {{
        private Stream{index} inner;
        public Buffered{index}(Stream{index} inner) {{ this.inner = inner; }}
        public override int Read() {{ return inner.Read(); }}
    }}

    public class Glyph{index} {{ public Glyph{index}(char c) {{ }} }}

    public class GlyphFactory{index}
    {{
        private Dictionary<char, Glyph{index}> glyphs = new Dictionary<char, Glyph{index}>();

        public Glyph{index} Get(char c)
        {{
            if (!glyphs.ContainsKey(c)) {{ glyphs[c] = new Glyph{index}(c); }}
            return glyphs[c];
        }}
    }}
}}
"#
    )
}

fn sources(modules: usize) -> Vec<(String, String)> {
    (0..modules)
        .map(|i| (format!("Module{i}.cs"), module_source(i)))
        .collect()
}

fn view(sources: &[(String, String)]) -> CompilationView {
    CompilationView::from_sources(sources.iter().map(|(name, text)| (name.as_str(), text.as_str()))).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let source = module_source(0);
    let parser = CSharpParser::new();
    c.bench_function("parse_module", |b| {
        b.iter(|| parser.parse_str(&source, "Module0.cs").unwrap())
    });
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection_pass");
    for modules in [10usize, 100] {
        let sources = sources(modules);
        let view = view(&sources);
        let token = CancellationToken::new();

        let parallel = AnalysisHost::default();
        group.bench_with_input(BenchmarkId::new("parallel", modules), &view, |b, view| {
            b.iter(|| parallel.run(view, &token))
        });

        let sequential = AnalysisHost::default().sequential();
        group.bench_with_input(BenchmarkId::new("sequential", modules), &view, |b, view| {
            b.iter(|| sequential.run(view, &token))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    for (name, text) in sources(50) {
        fs::write(dir.path().join(name), text).unwrap();
    }
    let pipeline = AnalysisPipeline::new(InspectorConfig::default());
    c.bench_function("full_pipeline_50_files", |b| {
        b.iter(|| pipeline.run(dir.path()).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_detection, bench_pipeline);
criterion_main!(benches);
