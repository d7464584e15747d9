//! Criterion benchmarks for the optimizer hot paths.
//!
//! Benchmarks:
//! 1. Full `select_squad` on synthetic pools of increasing size
//! 2. `select_squad` across budgets (ladder length grows with the budget)
//! 3. Rule-based points prediction over a full pool

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fplsquad_core::constraints::PositionQuotas;
use fplsquad_core::scoring::{predict_points, FixtureResult, MatchContext, PlayerStats, UpcomingFixture};
use fplsquad_core::synthetic::{synthetic_pool, SyntheticSpec};
use fplsquad_core::{select_squad, ConstraintSet, Price, TeamId};

// ── Helpers ──────────────────────────────────────────────────────────

fn pool_spec(scale: usize) -> SyntheticSpec {
    SyntheticSpec {
        counts: PositionQuotas { gk: 4 * scale, def: 12 * scale, mid: 14 * scale, fwd: 6 * scale },
        ..SyntheticSpec::with_seed(42)
    }
}

fn match_context() -> MatchContext {
    let results: Vec<FixtureResult> = (0..60u32)
        .map(|i| FixtureResult {
            home: TeamId(i % 20 + 1),
            away: TeamId((i + 7) % 20 + 1),
            home_score: i % 4,
            away_score: (i / 3) % 3,
        })
        .collect();
    let upcoming: Vec<UpcomingFixture> = (0..40u32)
        .map(|i| UpcomingFixture {
            home: TeamId(i % 20 + 1),
            away: TeamId((i + 11) % 20 + 1),
            home_difficulty: (i % 5 + 1) as u8,
            away_difficulty: ((i + 2) % 5 + 1) as u8,
        })
        .collect();
    MatchContext::from_fixtures(&results, &upcoming)
}

// ── 1. Pool size ─────────────────────────────────────────────────────

fn bench_pool_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_squad/pool_size");
    for scale in [1usize, 5, 10] {
        let pool = synthetic_pool(&pool_spec(scale));
        let constraints = ConstraintSet::default();
        group.bench_with_input(BenchmarkId::from_parameter(pool.len()), &pool, |b, pool| {
            b.iter(|| select_squad(black_box(pool), black_box(&constraints)))
        });
    }
    group.finish();
}

// ── 2. Budget ────────────────────────────────────────────────────────

fn bench_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_squad/budget");
    let pool = synthetic_pool(&pool_spec(10));
    for budget in [800u32, 1000, 1200] {
        let constraints = ConstraintSet::default().with_budget(Price(budget));
        group.bench_with_input(BenchmarkId::from_parameter(budget), &constraints, |b, constraints| {
            b.iter(|| select_squad(black_box(&pool), black_box(constraints)))
        });
    }
    group.finish();
}

// ── 3. Prediction ────────────────────────────────────────────────────

fn bench_predict(c: &mut Criterion) {
    let ctx = match_context();
    let stats: Vec<PlayerStats> = synthetic_pool(&pool_spec(10))
        .into_iter()
        .enumerate()
        .map(|(i, cand)| PlayerStats {
            team: cand.team,
            position: cand.position,
            total_points: cand.predicted_points * 20.0,
            minutes: (i as u32 * 37) % 3000,
            ownership_pct: cand.ownership_pct,
            availability: cand.availability,
        })
        .collect();

    c.bench_function("predict_points/full_pool", |b| {
        b.iter(|| {
            stats
                .iter()
                .map(|s| predict_points(black_box(s), black_box(&ctx)).predicted_points)
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_pool_size, bench_budget, bench_predict);
criterion_main!(benches);
