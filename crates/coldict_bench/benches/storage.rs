//! Persistence benchmarks.

use coldict_bench::utils::generate_records;
use coldict_core::{Dictionary, DictionaryDocument};
use coldict_storage::{FileBackend, InMemoryBackend};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

/// Benchmark saving a changed dictionary to a file.
fn bench_file_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_save");
    group.sample_size(20);

    for count in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("dictionary.json");
            let dictionary = Dictionary::open(Box::new(FileBackend::new(&path))).unwrap();
            for record in generate_records(count, 1) {
                dictionary.add(record);
            }

            b.iter(|| black_box(dictionary.save().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark opening a dictionary: decode plus index build.
fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");
    group.sample_size(20);

    for count in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let bytes = DictionaryDocument::new(generate_records(count, 1))
                .encode(false)
                .unwrap();
            let backend = InMemoryBackend::with_data(bytes);

            b.iter(|| {
                let dictionary = Dictionary::open(Box::new(backend.clone())).unwrap();
                black_box(dictionary.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_file_save, bench_open);
criterion_main!(benches);
