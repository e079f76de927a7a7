//! Benchmarks for the step pipeline.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use baba_sim::core::Action;
use baba_sim::grid::Grid;
use baba_sim::levels::{fallback_level, parse_level};
use baba_sim::objects::Registry;
use baba_sim::rules::extract_rules;

/// A row of rocks for baba to push back and forth against a wall.
fn push_level(width: usize) -> String {
    let mut level = String::from("biy\nrip\nwis\n");
    level.push('B');
    level.push_str(&"R".repeat(width.saturating_sub(3)));
    level.push_str(".W");
    level
}

fn bench_step_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_fallback");
    group.throughput(Throughput::Elements(1));

    let base = fallback_level(Arc::new(Registry::with_defaults()));
    for action in [Action::Wait, Action::Right] {
        group.bench_function(action.name(), |b| {
            b.iter_batched(
                || base.copy(),
                |mut grid| black_box(grid.step(black_box(action))),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_step_push_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_push_chain");
    let registry = Arc::new(Registry::with_defaults());

    for width in [8usize, 32, 128] {
        let Ok(base) = parse_level(&push_level(width), Arc::clone(&registry)) else {
            continue;
        };
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &base, |b, base| {
            b.iter_batched(
                || base.copy(),
                |mut grid| black_box(grid.step(Action::Right)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_rule_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_extraction");
    let registry = Arc::new(Registry::with_defaults());

    for size in [12usize, 48] {
        let mut grid = Grid::new(size, size, Arc::clone(&registry));
        for y in 0..size as i32 {
            for x in (0..size as i32 - 2).step_by(4) {
                grid.spawn("baba", true, x, y);
                grid.spawn("is", true, x + 1, y);
                grid.spawn("you", true, x + 2, y);
            }
        }
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| black_box(extract_rules(black_box(grid))));
        });
    }

    group.finish();
}

fn bench_copy(c: &mut Criterion) {
    let grid = fallback_level(Arc::new(Registry::with_defaults()));
    c.bench_function("grid_copy", |b| {
        b.iter(|| black_box(grid.copy()));
    });
}

criterion_group!(
    benches,
    bench_step_fallback,
    bench_step_push_chain,
    bench_rule_extraction,
    bench_copy,
);
criterion_main!(benches);
