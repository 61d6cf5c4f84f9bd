//! Benchmarks for deferred-value settlement, chaining, and fan-out.
//!
//! Measures how the cost of a full queue drain scales with chain depth and
//! with the number of independent subscribers on one instance.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use deferral::deferred::Deferred;
use deferral::scheduler::TaskQueue;
use std::hint::black_box;

// =============================================================================
// Chain depth
// =============================================================================

fn benchmark_chain_drain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_drain");

    for depth in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let queue = TaskQueue::new();
                let mut link = Deferred::fulfilled(queue.clone(), 0u64);
                for _ in 0..depth {
                    link = link.then(|value| Ok(value + 1));
                }
                queue.run_until_idle();
                black_box(link.value())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Fan-out
// =============================================================================

fn benchmark_fan_out(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("fan_out");

    for subscribers in [10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("subscribers", subscribers),
            &subscribers,
            |bencher, &subscribers| {
                bencher.iter(|| {
                    let queue = TaskQueue::new();
                    let parent = Deferred::fulfilled(queue.clone(), 1u64);
                    let children: Vec<_> = (0..subscribers)
                        .map(|offset| parent.then(move |value| Ok(value + offset)))
                        .collect();
                    queue.run_until_idle();
                    black_box(children.last().and_then(Deferred::value))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Late settlement
// =============================================================================

fn benchmark_late_settlement(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("late_settlement");

    group.bench_function("register_then_settle", |bencher| {
        bencher.iter(|| {
            let queue = TaskQueue::new();
            let mut stash = None;
            let deferred = Deferred::new(queue.clone(), |fulfill, _reject| {
                stash = Some(fulfill);
                Ok(())
            });
            let child = deferred.then(|value| Ok(value * 2));
            if let Some(fulfill) = stash {
                fulfill.settle(21u64);
            }
            queue.run_until_idle();
            black_box(child.value())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_chain_drain,
    benchmark_fan_out,
    benchmark_late_settlement
);
criterion_main!(benches);
