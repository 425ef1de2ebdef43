//! Deobfuscation Benchmark
//!
//! Measures end-to-end throughput (parse, rewrite, print) on generated
//! array-ref obfuscated programs.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsard_core::{DeobfuscateOptions, Deobfuscator};

// =============================================================================
// Test Sources
// =============================================================================

const SIMPLE_SOURCE: &str = r#"
var _0x3f2a = ["log", "Hello, ", "world", "length"];
console[_0x3f2a[0]](_0x3f2a[1] + _0x3f2a[2]);
var n = _0x3f2a[2][_0x3f2a[3]];
"#;

/// A program with `functions` functions, each reading `refs` array slots,
/// some through nested lookups.
fn generate_source(functions: usize, refs: usize) -> String {
    let mut source = String::from("var _0xa1 = [");
    for i in 0..64 {
        if i > 0 {
            source.push(',');
        }
        if i % 8 == 0 {
            source.push_str(&((i + 1) % 64).to_string());
        } else {
            source.push_str(&format!("\"s{i}\""));
        }
    }
    source.push_str("];\n");

    for f in 0..functions {
        source.push_str(&format!("function f{f}(a) {{\n  var r = [];\n"));
        for r in 0..refs {
            let slot = (f * 7 + r * 3) % 64;
            if r % 4 == 0 {
                source.push_str(&format!("  r.push(_0xa1[_0xa1[{}]]);\n", slot - slot % 8));
            } else {
                source.push_str(&format!(
                    "  if (a === _0xa1[{slot}]) {{ r[_0xa1[{}]] = _0xa1[{slot}] + a; }}\n",
                    slot - slot % 8
                ));
            }
        }
        source.push_str("  return r;\n}\n");
    }
    source
}

fn bench_simple(c: &mut Criterion) {
    let deobfuscator = Deobfuscator::new(DeobfuscateOptions::default());
    c.bench_function("deobfuscate_simple", |b| {
        b.iter(|| black_box(deobfuscator.run(black_box(SIMPLE_SOURCE))))
    });
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("deobfuscate_throughput");
    let deobfuscator = Deobfuscator::new(DeobfuscateOptions::default());

    for (functions, refs) in [(10, 10), (50, 20), (200, 20)] {
        let source = generate_source(functions, refs);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("functions", functions),
            &source,
            |b, source| b.iter(|| black_box(deobfuscator.run(source))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_simple, bench_throughput);
criterion_main!(benches);
