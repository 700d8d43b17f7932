//! Benchmarks for pattern compilation and DFA simulation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex_fsm::{compile, Pattern};

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_grouped_star", |b| {
        b.iter(|| compile(black_box("(a|b)*abb")).unwrap())
    });

    c.bench_function("compile_alternation_heavy", |b| {
        b.iter(|| compile(black_box("(a|b|c|d)+(e|f)?(g|h)*")).unwrap())
    });
}

fn bench_simulate(c: &mut Criterion) {
    let pattern = Pattern::compile("(a|b)*abb").unwrap();
    let accepted = "ab".repeat(64) + "abb";
    let rejected = "ab".repeat(64);

    c.bench_function("simulate_accept", |b| {
        b.iter(|| pattern.is_match(black_box(&accepted)))
    });

    c.bench_function("simulate_reject", |b| {
        b.iter(|| pattern.is_match(black_box(&rejected)))
    });
}

criterion_group!(benches, bench_compile, bench_simulate);
criterion_main!(benches);
