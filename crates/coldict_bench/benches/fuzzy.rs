//! Scorer benchmarks.

use coldict_core::fuzzy::{default_process, extract_one, partial_ratio, ratio, wratio};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_scorers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scorers");
    let a = default_process("street_address_1");
    let b = default_process("customer street address line 1");

    group.bench_function("ratio", |bench| {
        bench.iter(|| black_box(ratio(black_box(&a), black_box(&b))));
    });
    group.bench_function("partial_ratio", |bench| {
        bench.iter(|| black_box(partial_ratio(black_box(&a), black_box(&b))));
    });
    group.bench_function("wratio", |bench| {
        bench.iter(|| black_box(wratio(black_box(&a), black_box(&b))));
    });

    group.finish();
}

fn bench_extract_one(c: &mut Criterion) {
    let choices = coldict_bench::utils::generate_names(1_000, 3);

    c.bench_function("extract_one_1000", |b| {
        b.iter(|| black_box(extract_one(black_box("street addres"), &choices)));
    });
}

criterion_group!(benches, bench_scorers, bench_extract_one);
criterion_main!(benches);
