//! Analysis phase timing.
//!
//! Measures scan, parse, bind and completion separately on generated object
//! sources of increasing size, plus a pass over a source full of syntax
//! errors to keep recovery cost visible.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

/// A source with `decl_count` top-level declarations of mixed shape.
fn generate_source(decl_count: usize) -> String {
    let mut src = String::with_capacity(decl_count * 300);
    src.push_str("#include <sys/types.h>\ninherit \"std/room\";\n\n");

    for i in 0..decl_count {
        match i % 4 {
            0 => src.push_str(&format!(
                r#"private int counter{i} = {i};

"#
            )),
            1 => src.push_str(&format!(
                r#"int sum{i}(int a, int b...) {{
    int total = a;
    foreach (int x in b) {{
        total += x;
    }}
    return total + counter{prev};
}}

"#,
                prev = i - 1
            )),
            2 => src.push_str(&format!(
                r#"class Item{i} {{
    string name;
    mapping props = ([ "weight": {i}, "value": 3 ]);
}}

"#
            )),
            3 => src.push_str(&format!(
                r#"static void reset{i}(string[] who) {{
    if (sizeof(who) > 2) {{
        try {{ who[0]->reset(); }} catch (err) {{ return; }}
    }}
    object o = new Item{prev}();
}}

"#,
                prev = i - 1
            )),
            _ => unreachable!(),
        }
    }
    src
}

fn bench_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("phases");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(30);

    for decl_count in [25, 100, 400] {
        let source = generate_source(decl_count);
        let label = format!("{}decls_{}lines", decl_count, source.lines().count());

        group.bench_with_input(BenchmarkId::new("1_scan", &label), &source, |b, src| {
            b.iter(|| black_box(mudz::ScannerState::new(src.as_str(), false).count()));
        });

        group.bench_with_input(BenchmarkId::new("2_parse", &label), &source, |b, src| {
            b.iter(|| {
                let mut parser = mudz::ParserState::new("bench.c".to_string(), src.clone());
                black_box(parser.parse_source_file());
            });
        });

        group.bench_with_input(
            BenchmarkId::new("3_parse_bind", &label),
            &source,
            |b, src| {
                b.iter(|| {
                    let mut parser = mudz::ParserState::new("bench.c".to_string(), src.clone());
                    let root = parser.parse_source_file();
                    black_box(mudz::build_scopes(parser.get_arena(), root));
                });
            },
        );

        let analyzed = mudz::analyze("bench.c", &source);
        let cursor = source.rfind("return;").map_or(0, |i| i as u32);
        group.bench_with_input(
            BenchmarkId::new("4_complete", &label),
            &analyzed,
            |b, file| {
                b.iter(|| black_box(mudz::Completions::new(file).complete(cursor)));
            },
        );
    }
    group.finish();
}

fn bench_recovery(c: &mut Criterion) {
    let broken = generate_source(100)
        .replace(';', "")
        .replace(')', "");
    c.bench_function("recovery/analyze_broken_source", |b| {
        b.iter(|| black_box(mudz::analyze("broken.c", &broken)));
    });
}

criterion_group!(benches, bench_phases, bench_recovery);
criterion_main!(benches);
