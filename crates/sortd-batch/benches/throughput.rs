//! Batch sort throughput benchmarks.
//!
//! Compares sorting a batch sequentially on one thread against the
//! fan-out/fan-in engine at several batch sizes.
//!
//! # Running
//! ```bash
//! cargo bench --package sortd-batch
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use sortd_batch::{BatchConfig, BatchEngine, BatchJob};
use sortd_core::SortRequest;

// ─── Input factory ────────────────────────────────────────────────────────────

fn make_sequence(seed: u64, len: usize) -> SortRequest {
    // LCG fill so every sequence differs
    let mut val = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let numbers = (0..len)
        .map(|_| {
            val = val.wrapping_mul(1103515245).wrapping_add(12345);
            (val >> 16) as i64 % 1_000_000
        })
        .collect();
    SortRequest::new(numbers)
}

fn make_batch(sequences: usize, len: usize) -> Vec<SortRequest> {
    (0..sequences)
        .map(|i| make_sequence(i as u64, len))
        .collect()
}

// ─── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_sort");
    for sequences in [1, 16, 256] {
        let batch = make_batch(sequences, 10_000);
        group.throughput(Throughput::Elements(sequences as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sequences),
            &batch,
            |b, batch| {
                b.iter_batched(
                    || batch.clone(),
                    |batch| {
                        batch
                            .into_iter()
                            .map(SortRequest::into_sorted)
                            .collect::<Vec<_>>()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let engine = BatchEngine::new(&BatchConfig::default()).expect("build engine");

    let mut group = c.benchmark_group("batch_engine");
    for sequences in [1, 16, 256] {
        let batch = make_batch(sequences, 10_000);
        group.throughput(Throughput::Elements(sequences as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sequences),
            &batch,
            |b, batch| {
                b.iter_batched(
                    || BatchJob::new(batch.clone()),
                    |job| engine.sort_batch(job),
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_sequential, bench_engine);
criterion_main!(benches);
