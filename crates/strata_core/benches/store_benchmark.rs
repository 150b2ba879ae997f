//! # Store Performance Benchmark
//!
//! Covers the hot operations of the store:
//! - Attaching components to many entities
//! - Dense iteration over one component array
//! - Swap-with-last removal churn
//! - View construction over a component intersection
//!
//! Run with: `cargo bench --package strata_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strata_core::{Entity, Store, StoreConfig};

/// Entities used by the larger benchmarks.
const ENTITY_COUNT: usize = 100_000;

#[derive(Clone, Copy, Debug, Default)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Debug, Default)]
struct Velocity {
    x: f32,
    y: f32,
}

fn populated_store(count: usize) -> (Store, Vec<Entity>) {
    let mut store = Store::with_config(StoreConfig::with_capacity(count));
    let mut entities = Vec::with_capacity(count);
    for i in 0..count {
        let e = store.create();
        let f = i as f32;
        store
            .insert(e, Position { x: f, y: f })
            .expect("capacity sized for benchmark");
        if i % 2 == 0 {
            store
                .insert(e, Velocity { x: 0.1, y: 0.2 })
                .expect("capacity sized for benchmark");
        }
        entities.push(e);
    }
    (store, entities)
}

/// Benchmark: Create entities and attach one component each.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_position");

    for count in [1_000, 10_000, ENTITY_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut store = Store::with_config(StoreConfig::with_capacity(count));
                for _ in 0..count {
                    let e = store.create();
                    black_box(store.insert(e, Position::default())).ok();
                }
                store.component_count::<Position>()
            });
        });
    }

    group.finish();
}

/// Benchmark: Dense slice iteration (the reason the arrays are compacted).
fn bench_dense_iteration(c: &mut Criterion) {
    let (mut store, _) = populated_store(ENTITY_COUNT);

    c.bench_function("dense_update_100K_positions", |b| {
        b.iter(|| {
            if let Some(positions) = store.array_mut::<Position>() {
                for pos in positions.as_mut_slice() {
                    pos.x += 0.001;
                    pos.y += 0.001;
                }
            }
            black_box(store.len())
        });
    });
}

/// Benchmark: Random-access gets through the store.
fn bench_get(c: &mut Criterion) {
    let (store, entities) = populated_store(ENTITY_COUNT);

    c.bench_function("get_position_100K", |b| {
        b.iter(|| {
            let mut sum = 0.0_f32;
            for &e in &entities {
                if let Ok(pos) = store.get::<Position>(e) {
                    sum += pos.x;
                }
            }
            black_box(sum)
        });
    });
}

/// Benchmark: Destroy and recreate a slice of entities.
fn bench_destroy_create_cycle(c: &mut Criterion) {
    let (mut store, mut entities) = populated_store(ENTITY_COUNT);

    c.bench_function("destroy_create_cycle_10K", |b| {
        b.iter(|| {
            for e in entities.iter().take(10_000) {
                black_box(store.destroy(*e)).ok();
            }
            for e in entities.iter_mut().take(10_000) {
                *e = store.create();
                black_box(store.insert(*e, Position::default())).ok();
            }
            black_box(store.len())
        });
    });
}

/// Benchmark: Build a view over the Position + Velocity intersection.
fn bench_view(c: &mut Criterion) {
    let (mut store, _) = populated_store(ENTITY_COUNT);

    c.bench_function("view_position_velocity_100K", |b| {
        b.iter(|| black_box(store.view::<(Position, Velocity)>().len()));
    });

    c.bench_function("view_integrate_50K", |b| {
        let view = store.view::<(Position, Velocity)>();
        b.iter(|| {
            for &e in &view {
                if let Ok((pos, vel)) = view.get_multiple_mut::<(Position, Velocity)>(&mut store, e) {
                    pos.x += vel.x;
                    pos.y += vel.y;
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_dense_iteration,
    bench_get,
    bench_destroy_create_cycle,
    bench_view,
);
criterion_main!(benches);
