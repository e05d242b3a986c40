//! Engine benchmarks over an in-memory chain.
//!
//! Run with: `cargo bench --package feedscope-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use feedscope_bench::{BENCH_FEED, bench_chain, bench_engine, instant_of};
use feedscope_lib::{EngineConfig, I256, QueryRequest, block_at_timestamp, format_fixed};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn date_to_block_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("date_to_block");

    for height in [10_000u64, 1_000_000, 100_000_000] {
        let chain = bench_chain(height);
        let target = instant_of(&chain, height / 3);
        let config = EngineConfig::default().resolver;

        group.bench_with_input(BenchmarkId::from_parameter(height), &height, |b, &height| {
            b.to_async(&rt).iter(|| async {
                block_at_timestamp(&chain, black_box(target), height, &config)
                    .await
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn sampling_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("query");
    let samples = 1_000u64;
    group.throughput(Throughput::Elements(samples));

    for concurrency in [1usize, 8, 32] {
        let chain = bench_chain(1_000_000);
        let engine = bench_engine(&chain, concurrency);
        let request = QueryRequest::blocks("56", BENCH_FEED, 0, (samples - 1) * 100, 100);

        group.bench_with_input(
            BenchmarkId::new("concurrency", concurrency),
            &request,
            |b, request| {
                b.to_async(&rt)
                    .iter(|| async { engine.run(request).await.unwrap() });
            },
        );
    }

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let value = I256::from_dec_str("3051234500000000000000").unwrap();
    c.bench_function("format_fixed", |b| {
        b.iter(|| format_fixed(black_box(value), 18));
    });
}

criterion_group!(benches, date_to_block_benchmark, sampling_benchmark, format_benchmark);
criterion_main!(benches);
