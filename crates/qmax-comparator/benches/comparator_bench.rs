//! Comparator benchmarks
//!
//! Goal: a minimal set that finishes within a minute both locally and on CI.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qmax_comparator::{
    ComparatorConfig, EncodingMode, Simulator, app::verify::verify_exhaustive, build_comparator,
    encode_operands, find_the_largest_number,
};

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(8))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let bits = encode_operands(i32::MIN as i64, i32::MAX as i64, 32, EncodingMode::Minimal)
        .expect("operands fit in 32 bits");
    group.bench_function("comparator_32bit", |b| {
        b.iter(|| build_comparator(black_box(&bits)))
    });

    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");

    let bits = encode_operands(-123_456, 654_321, 32, EncodingMode::Fixed)
        .expect("operands fit in 32 bits");
    let comparator = build_comparator(&bits).expect("valid comparator");
    let simulator = Simulator::new(Some(0));

    group.bench_function("single_shot_96_qubits", |b| {
        b.iter(|| simulator.run(black_box(&comparator.circuit), 1))
    });
    group.bench_function("parallel_1024_shots", |b| {
        b.iter(|| simulator.run(black_box(&comparator.circuit), 1024))
    });

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");

    group.bench_function("find_the_largest_number", |b| {
        b.iter(|| find_the_largest_number(black_box(-42), black_box(1_000_000)))
    });
    group.bench_function("verify_exhaustive_6bit", |b| {
        b.iter(|| verify_exhaustive(6, EncodingMode::Minimal))
    });

    let config = ComparatorConfig {
        seed: Some(0),
        draw: true,
        ..ComparatorConfig::default()
    };
    group.bench_function("with_drawing", |b| {
        b.iter(|| qmax_comparator::run_comparison(black_box(7), black_box(-7), &config))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets = bench_build, bench_simulate, bench_end_to_end
}
criterion_main!(benches);
