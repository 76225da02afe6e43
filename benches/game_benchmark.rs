//! Benchmarks for running complete games.
//!
//! This benchmarks the self-play game loop and the per-turn board update.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use delve::Game;
use delve::sim::{SimConfig, run_game};

fn bench_single_game(c: &mut Criterion) {
    let sim = SimConfig::default();

    c.bench_function("single_game_2p", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&sim));
            black_box(result)
        });
    });
}

fn bench_single_game_4p(c: &mut Criterion) {
    let sim = SimConfig {
        players: 4,
        size: (16, 16),
        ..SimConfig::default()
    };

    c.bench_function("single_game_4p_16x16", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&sim));
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // 10 games sequentially (without parallel overhead)
    let sim = SimConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_game(black_box(seed), black_box(&sim));
                let _ = black_box(result);
            }
        });
    });
}

fn bench_next_turn_large_board(c: &mut Criterion) {
    // Board update dominates on big boards
    let game = Game::with_seed(&["A", "B", "C", "D"], (128, 128), 7).unwrap();

    c.bench_function("next_turn_128x128", |b| {
        b.iter_batched(
            || game.clone(),
            |mut game| black_box(game.next_turn()),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_single_game_4p,
    bench_game_batch,
    bench_next_turn_large_board
);
criterion_main!(benches);
