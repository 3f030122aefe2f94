//! Benchmarks for the configuration pipeline.
//!
//! Measures merging, validation and rendering separately, plus the
//! rendering cost as the number of CI scripts grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use repo_bones::config::{parse, ConfigFormat};
use repo_bones::render::{default_specs, RenderMode, TemplateRegistry, TemplateRenderer};
use repo_bones::resolver::ConfigResolver;
use repo_bones::schema::Schema;
use serde_yaml::Value;

const NAMES: &str = "project_name: Bench\npkg_name: bench\nrepo_name: org/bench\n";

const FULL_CONFIG: &str = r#"
project_name: Bench
pkg_name: bench
repo_name: org/bench
ci:
  python_versions: ["3.8", "3.9", "3.10"]
  pip_install: [numpy, scipy]
  scripts:
    - template: static
    - template: test
    - template: docs
style:
  max_line_length: 88
packaging:
  install_requires: [numpy>=1.16]
  extras_require:
    tests: [pytest]
"#;

/// A configuration with `count` CI scripts.
fn config_with_scripts(count: usize) -> String {
    let mut config = format!("{NAMES}ci:\n  scripts:\n");
    for i in 0..count {
        config.push_str(&format!(
            "    - template: test\n      output_name: test-{i}\n"
        ));
    }
    config
}

fn raw(text: &str) -> Value {
    parse(text, ConfigFormat::Yaml).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let schema = Schema::builtin();
    let resolver = ConfigResolver::new(&schema);
    let full = raw(FULL_CONFIG);
    let merged = resolver.merge(&full).unwrap();

    let mut group = c.benchmark_group("resolve");
    group.bench_function("merge", |b| b.iter(|| resolver.merge(black_box(&full))));
    group.bench_function("validate", |b| {
        b.iter(|| resolver.validate(black_box(&merged)))
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let schema = Schema::builtin();
    let resolver = ConfigResolver::new(&schema);
    let renderer = TemplateRenderer::new(&TemplateRegistry::builtin()).unwrap();

    let mut group = c.benchmark_group("render");
    group.bench_function("compile_registry", |b| {
        b.iter(|| TemplateRenderer::new(black_box(&TemplateRegistry::builtin())))
    });

    for scripts in [0, 5, 20] {
        let doc = resolver.merge(&raw(&config_with_scripts(scripts))).unwrap();
        let specs = default_specs(&doc);
        group.bench_with_input(BenchmarkId::new("scripts", scripts), &doc, |b, doc| {
            b.iter(|| renderer.render_all(black_box(&specs), doc, RenderMode::FailFast))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_render);
criterion_main!(benches);
