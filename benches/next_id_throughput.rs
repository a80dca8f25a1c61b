//! Benchmarks for sequence generation.
//!
//! Run with: cargo bench
//! View results in: target/criterion/report/index.html

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eid::contracts::SequenceGenerator;
use eid::registry::Registry;
use eid::storage::MemoryStore;

// =============================================================================
// Hot Path Benchmarks
// =============================================================================

fn bench_generator_next(c: &mut Criterion) {
    let registry = Registry::new();
    let gen = registry.get_generator("bench");

    c.bench_function("generator_next", |b| b.iter(|| black_box(gen.next())));
}

fn bench_registry_next_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_next_id");

    // Lookup cost grows with the number of materialized keys
    for keys in [1usize, 100, 10_000].iter() {
        let registry = Registry::new();
        for k in 0..*keys {
            registry.get_generator(&format!("key-{}", k));
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(keys), keys, |b, _| {
            b.iter(|| registry.next_id(black_box("key-0")))
        });
    }

    group.finish();
}

fn bench_contended_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_next");
    let increments_per_thread = 10_000u64;

    for threads in [2usize, 4, 8].iter() {
        group.throughput(Throughput::Elements(*threads as u64 * increments_per_thread));
        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, &threads| {
            b.iter(|| {
                let registry = Arc::new(Registry::new());
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let r = Arc::clone(&registry);
                        thread::spawn(move || {
                            let gen = r.get_generator("contended");
                            for _ in 0..increments_per_thread {
                                black_box(gen.next());
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Lifecycle Benchmarks
// =============================================================================

fn bench_close_snapshot(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::new());
    let registry = Registry::with_store(Arc::clone(&store)).unwrap();
    for k in 0..1_000 {
        registry.next_id(&format!("key-{}", k));
    }

    c.bench_function("close_1000_keys", |b| b.iter(|| registry.close().unwrap()));
}

criterion_group!(
    benches,
    bench_generator_next,
    bench_registry_next_id,
    bench_contended_next,
    bench_close_snapshot
);
criterion_main!(benches);
