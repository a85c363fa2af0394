//! Bundle Benchmark
//!
//! Parse, analyse and expand a synthetic module graph held in memory.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use esroll::parser::parse_module;
use esroll::{BundleOptions, Bundler, MemoryReader, PathResolver};

/// A chain of `modules` files; each exports `functions` functions that call
/// into the previous module, plus the same number of unused ones.
fn generate_graph(modules: usize, functions: usize) -> (MemoryReader, usize) {
    let mut reader = MemoryReader::new();
    let mut bytes = 0;
    for m in 0..modules {
        let mut source = String::new();
        if m > 0 {
            let imports: Vec<String> = (0..functions).map(|f| format!("f{}_{f}", m - 1)).collect();
            source.push_str(&format!(
                "import {{ {} }} from './m{}';\n",
                imports.join(", "),
                m - 1
            ));
        }
        for f in 0..functions {
            let call = if m > 0 {
                format!("f{}_{f}(x)", m - 1)
            } else {
                "x".to_string()
            };
            source.push_str(&format!(
                "export function f{m}_{f}(x) {{ const y = {call} + {f}; return y * 2; }}\n"
            ));
            source.push_str(&format!(
                "export function unused{m}_{f}(a, b) {{ if (a) {{ return [a, b].map(v => v + 1); }} return {{ a, b }}; }}\n"
            ));
        }
        bytes += source.len();
        reader.insert(format!("/bench/m{m}.js"), source);
    }

    let last = modules - 1;
    let calls: Vec<String> = (0..functions).map(|f| format!("f{last}_{f}(1)")).collect();
    let imports: Vec<String> = (0..functions).map(|f| format!("f{last}_{f}")).collect();
    let entry = format!(
        "import {{ {} }} from './m{last}';\nconsole.log({});\n",
        imports.join(", "),
        calls.join(", ")
    );
    bytes += entry.len();
    reader.insert("/bench/main.js", entry);
    (reader, bytes)
}

fn bench_bundle(c: &mut Criterion) {
    let mut group = c.benchmark_group("bundle");

    for (modules, functions) in [(5, 5), (20, 10), (50, 20)] {
        let (reader, bytes) = generate_graph(modules, functions);
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(
            BenchmarkId::new("build", format!("{modules}x{functions}")),
            &reader,
            |b, reader| {
                b.iter(|| {
                    let mut bundler = Bundler::with_io(
                        BundleOptions::new("/bench/main.js"),
                        PathResolver,
                        reader.clone(),
                    );
                    black_box(bundler.build())
                })
            },
        );
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let source: String = (0..500)
        .map(|i| format!("export const v{i} = [{i}, `t${{{i}}}`, {{ k: /re{i}/g }}].map((x) => x ?? v{i});\n"))
        .collect();
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("module_500_statements", |b| {
        b.iter(|| black_box(parse_module(source.as_str())))
    });

    group.finish();
}

criterion_group!(benches, bench_bundle, bench_parse);
criterion_main!(benches);
