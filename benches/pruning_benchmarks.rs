//! Benchmarks for version sorting and a full pruning run against the memory platform

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lambda_prune::platform::MemoryPlatform;
use lambda_prune::prune::{ExecutionStrategy, Pruner};
use lambda_prune::versions::{sort_newest_first, RetentionPolicy};
use lambda_prune::FunctionDefinition;
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn bench_sort_versions(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_versions");

    for size in [10usize, 100, 1_000] {
        // Listing order: $LATEST first, then ascending
        let listing: Vec<String> = std::iter::once("$LATEST".to_string())
            .chain((1..=size).map(|v| v.to_string()))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &listing, |b, listing| {
            b.iter_batched(
                || listing.clone(),
                |ids| black_box(sort_newest_first(ids)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_prune_run(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("prune_run");

    for strategy in [
        ExecutionStrategy::Sequential,
        ExecutionStrategy::Bounded { workers: 10 },
    ] {
        group.bench_function(BenchmarkId::from_parameter(strategy), |b| {
            b.to_async(&rt).iter_batched(
                || {
                    let mut builder = MemoryPlatform::builder().with_page_size(50);
                    let mut definitions = Vec::new();
                    for i in 0..50 {
                        let name = format!("svc-fn{i}");
                        builder = builder.with_published(&name, 120);
                        definitions.push(FunctionDefinition::new(format!("fn{i}"), name));
                    }
                    (Arc::new(builder.build()), definitions)
                },
                |(platform, definitions)| async move {
                    let summary = Pruner::new(platform)
                        .with_policy(RetentionPolicy::default())
                        .with_strategy(strategy)
                        .run(definitions)
                        .await;
                    black_box(summary.versions_deleted())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sort_versions, bench_prune_run);
criterion_main!(benches);
