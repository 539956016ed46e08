//! Benchmarks for the engine's governance hot paths.
//!
//! Covers:
//! - Queue operations (enqueue/dequeue across lanes)
//! - Budget check/deduct
//! - ResourcePool consume fast path and self-heal branch

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use foreman::core::budget::BudgetGovernor;
use foreman::core::context::DepletionFlag;
use foreman::core::queue::{Priority, Task, TaskQueue};
use foreman::core::resource::{ReplenishRange, ResourcePool};

fn lane_of(i: u64) -> Priority {
    match i % 3 {
        0 => Priority::High,
        1 => Priority::Medium,
        _ => Priority::Low,
    }
}

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    for depth in [64_u64, 1_024] {
        group.throughput(Throughput::Elements(depth));
        group.bench_with_input(
            BenchmarkId::new("enqueue_drain", depth),
            &depth,
            |b, &depth| {
                b.iter(|| {
                    let queue = TaskQueue::new(DepletionFlag::new());
                    for i in 0..depth {
                        queue.enqueue(Task::new(lane_of(i), "bench", || {}));
                    }
                    while let Some(task) = queue.dequeue() {
                        black_box(task.id());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_budget(c: &mut Criterion) {
    c.bench_function("budget/check_deduct", |b| {
        let budget = BudgetGovernor::new(i64::MAX / 2);
        b.iter(|| {
            if budget.check(black_box(7)) {
                budget.deduct(7);
            }
        });
    });
}

fn bench_resource(c: &mut Criterion) {
    c.bench_function("resource/consume_fast_path", |b| {
        let pool = ResourcePool::new("bricks", u64::MAX / 2);
        b.iter(|| pool.consume(black_box(1), 0, ReplenishRange::new(1, 2)));
    });

    c.bench_function("resource/consume_self_heal", |b| {
        let pool = ResourcePool::new("cement", 0);
        b.iter(|| pool.consume(black_box(u64::MAX / 2), 0, ReplenishRange::new(1, 2)));
    });
}

criterion_group!(benches, bench_queue, bench_budget, bench_resource);
criterion_main!(benches);
