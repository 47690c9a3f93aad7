//! Performance benchmarks for rating calculations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glicko_rating::config::GlickoConfig;
use glicko_rating::rating::converge_volatility;
use glicko_rating::types::Outcome;
use glicko_rating::{Rating, Workspace};

fn opponent_field(count: usize) -> Vec<Rating> {
    (0..count)
        .map(|i| {
            Rating::new(
                1200.0 + (i % 13) as f64 * 50.0,
                40.0 + (i % 7) as f64 * 40.0,
                0.06,
            )
            .unwrap()
        })
        .collect()
}

fn scores(count: usize) -> Vec<f64> {
    [Outcome::Win, Outcome::Draw, Outcome::Loss]
        .iter()
        .cycle()
        .take(count)
        .map(|outcome| outcome.score())
        .collect()
}

fn bench_reference_period(c: &mut Criterion) {
    let player = Rating::new(1500.0, 200.0, 0.06).unwrap();
    let opponents = vec![
        Rating::new(1400.0, 30.0, 0.06).unwrap(),
        Rating::new(1550.0, 100.0, 0.06).unwrap(),
        Rating::new(1700.0, 300.0, 0.06).unwrap(),
    ];
    let results = [1.0, 0.0, 0.0];

    c.bench_function("reference_period_3_opponents", |b| {
        b.iter(|| {
            let mut player = player;
            player
                .update_batch(black_box(&opponents), black_box(&results))
                .unwrap();
            player.commit();
            black_box(player)
        })
    });
}

fn bench_single_update(c: &mut Criterion) {
    let player = Rating::new(1500.0, 200.0, 0.06).unwrap();
    let opponent = Rating::new(1620.0, 80.0, 0.06).unwrap();

    c.bench_function("single_update", |b| {
        b.iter(|| {
            let mut player = player;
            player.update_single(black_box(&opponent), 1.0).unwrap();
            black_box(player.pending().copied())
        })
    });
}

fn bench_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_update");
    let player = Rating::new(1500.0, 200.0, 0.06).unwrap();

    for count in [10usize, 100, 1000] {
        let opponents = opponent_field(count);
        let results = scores(count);

        group.bench_with_input(BenchmarkId::new("fresh", count), &count, |b, _| {
            b.iter(|| {
                let mut player = player;
                player.update_batch(&opponents, &results).unwrap();
                black_box(player.pending().copied())
            })
        });

        let mut workspace = Workspace::with_capacity(count);
        group.bench_with_input(BenchmarkId::new("workspace", count), &count, |b, _| {
            b.iter(|| {
                let mut player = player;
                player
                    .update_batch_with(&mut workspace, &opponents, &results)
                    .unwrap();
                black_box(player.pending().copied())
            })
        });
    }

    group.finish();
}

fn bench_volatility_solver(c: &mut Criterion) {
    let config = GlickoConfig::default();

    c.bench_function("converge_volatility", |b| {
        b.iter(|| {
            converge_volatility(
                black_box(-0.4834),
                black_box(1.7785),
                black_box(1.1513),
                black_box(0.06),
                &config,
            )
        })
    });
}

fn bench_decay(c: &mut Criterion) {
    let player = Rating::new(1500.0, 60.0, 0.06).unwrap();

    c.bench_function("decay_and_commit", |b| {
        b.iter(|| {
            let mut player = player;
            player.decay();
            player.commit();
            black_box(player)
        })
    });
}

criterion_group!(
    benches,
    bench_reference_period,
    bench_single_update,
    bench_batch_sizes,
    bench_volatility_solver,
    bench_decay
);
criterion_main!(benches);
