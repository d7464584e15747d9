//! Seeded synthetic candidate pools.
//!
//! Used when no real data is available (demos, benchmarks, property tests).
//! Prices fall in realistic per-position bands, predicted points track price
//! with noise, and a configurable fraction of players is flagged unavailable.
//! The same spec always produces the same pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constraints::PositionQuotas;
use crate::domain::{Availability, Candidate, CandidateId, Position, Price, TeamId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub seed: u64,
    /// Players generated per position.
    pub counts: PositionQuotas,
    pub teams: u32,
    /// Probability that a player is injured or suspended, 0–1.
    pub unavailable_rate: f64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            seed: 42,
            counts: PositionQuotas { gk: 40, def: 120, mid: 140, fwd: 60 },
            teams: 20,
            unavailable_rate: 0.05,
        }
    }
}

impl SyntheticSpec {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }
}

/// Price band in tenths and the points range it maps onto.
struct Band {
    min_price: u32,
    max_price: u32,
    min_points: f64,
    max_points: f64,
}

fn band(position: Position) -> Band {
    match position {
        Position::Gk => Band { min_price: 40, max_price: 60, min_points: 2.0, max_points: 5.0 },
        Position::Def => Band { min_price: 40, max_price: 75, min_points: 2.0, max_points: 6.0 },
        Position::Mid => Band { min_price: 45, max_price: 130, min_points: 2.5, max_points: 9.0 },
        Position::Fwd => Band { min_price: 45, max_price: 145, min_points: 2.5, max_points: 9.5 },
    }
}

/// Generate a pool. Ids run from 1 in position order; teams are assigned
/// round-robin so every club gets a similar mix.
pub fn synthetic_pool(spec: &SyntheticSpec) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let teams = spec.teams.max(1);
    let unavailable_rate = spec.unavailable_rate.clamp(0.0, 1.0);

    let mut out = Vec::with_capacity(spec.counts.total());
    let mut next_id = 1u32;
    for &position in &Position::ALL {
        let band = band(position);
        for n in 0..spec.counts.get(position) {
            // Skew toward cheap players: most of a real pool sits near the floor.
            let u: f64 = rng.gen::<f64>().powi(2);
            let span = f64::from(band.max_price - band.min_price);
            let tenths = band.min_price + (u * span).round() as u32;
            let quality = f64::from(tenths - band.min_price) / span;

            let noise: f64 = rng.gen_range(-1.0..1.0);
            let points = (band.min_points + quality * (band.max_points - band.min_points) + noise).max(0.0);
            let ownership = (quality * 45.0 + rng.gen_range(0.0..15.0)).min(60.0);

            let availability = if rng.gen_bool(unavailable_rate) {
                if rng.gen_bool(0.8) {
                    Availability::Injured
                } else {
                    Availability::Suspended
                }
            } else {
                Availability::Fit
            };

            out.push(Candidate {
                id: CandidateId(next_id),
                name: format!("{} {}", position.label(), n + 1),
                team: TeamId(next_id % teams + 1),
                position,
                price: Price::from_tenths(tenths),
                predicted_points: (points * 100.0).round() / 100.0,
                ownership_pct: (ownership * 10.0).round() / 10.0,
                availability,
            });
            next_id += 1;
        }
    }
    out
}
