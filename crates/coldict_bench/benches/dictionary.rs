//! Dictionary benchmarks.

use coldict_bench::utils::{generate_names, generate_records, populated_dictionary};
use coldict_core::Dictionary;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark adding fresh records.
fn bench_add_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_new");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let records = generate_records(count, 1);
            b.iter(|| {
                let dictionary = Dictionary::open_in_memory().unwrap();
                for record in &records {
                    black_box(dictionary.add(record.clone()));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark re-adding records the dictionary already holds.
fn bench_add_unchanged(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_unchanged");

    for count in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let dictionary = populated_dictionary(count, 1);
            let records = dictionary.records();
            b.iter(|| {
                for record in &records {
                    black_box(dictionary.add(record.clone()));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark exact lookups.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for count in [1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let dictionary = populated_dictionary(count, 1);
            let names = dictionary.names();
            let mut i = 0;
            b.iter(|| {
                let name = &names[i % names.len()];
                i += 1;
                black_box(dictionary.lookup(black_box(name)));
            });
        });
    }

    group.finish();
}

/// Benchmark fuzzy lookups with unseen queries.
fn bench_fuzzy_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_lookup");
    group.sample_size(30);

    for count in [100, 1_000, 5_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let dictionary = populated_dictionary(count, 1);
            let queries = generate_names(64, 2);
            let mut i = 0;
            b.iter(|| {
                let query = &queries[i % queries.len()];
                i += 1;
                black_box(dictionary.fuzzy_lookup(black_box(query), 75));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_new,
    bench_add_unchanged,
    bench_lookup,
    bench_fuzzy_lookup
);
criterion_main!(benches);
