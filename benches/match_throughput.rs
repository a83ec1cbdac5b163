//! Match throughput benchmarks.
//!
//! Plays complete demo matches with random seats, and with a planner
//! seat at a few search depths.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pocket_engine::game::{DEMO_DECK_A, DEMO_DECK_B};
use pocket_engine::{Catalog, EnergyType, Match, MatchConfig, PlayerSpec, PolicyKind};

fn play(catalog: &Arc<Catalog>, seed: u64, second: PolicyKind) -> u32 {
    let mut game = Match::builder(Arc::clone(catalog))
        .config(MatchConfig::new().with_seed(seed))
        .player(PlayerSpec::new("alice", DEMO_DECK_A, [EnergyType::Psychic]))
        .player(PlayerSpec::new("bob", DEMO_DECK_B, [EnergyType::Psychic]).with_policy(second))
        .build()
        .expect("demo match builds");
    game.play().expect("demo match plays").turn
}

fn bench_random_matches(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::standard());
    let mut seed = 0u64;
    c.bench_function("random_vs_random", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(play(&catalog, seed, PolicyKind::Random))
        })
    });
}

fn bench_planner_depth(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::standard());
    let mut group = c.benchmark_group("planner_depth");
    group.sample_size(20);
    for depth in [1usize, 2, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| black_box(play(&catalog, 7, PolicyKind::Planner { depth })))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random_matches, bench_planner_depth);
criterion_main!(benches);
