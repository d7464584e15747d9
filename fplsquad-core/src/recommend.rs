//! Transfer shortlists.
//!
//! Lighter-weight than squad selection: rank the pool by a few simple lenses
//! so a manager can look for individual transfers.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Candidate, Position, Price};
use crate::optimizer::rank_cmp;

/// Default floor below which a candidate is not worth recommending.
pub const DEFAULT_MIN_POINTS: f64 = 3.0;

/// Ownership below which a pick counts as a differential.
pub const DIFFERENTIAL_OWNERSHIP_PCT: f64 = 5.0;

/// Top `top_n` candidates per position, in rank order.
pub fn best_by_position(candidates: &[Candidate], top_n: usize) -> BTreeMap<Position, Vec<Candidate>> {
    Position::ALL
        .iter()
        .map(|&position| {
            let mut group: Vec<&Candidate> = candidates.iter().filter(|c| c.position == position).collect();
            group.sort_by(|a, b| rank_cmp(a, b));
            (position, group.into_iter().take(top_n).cloned().collect())
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Highest points per price among affordable candidates.
    pub best_value: Vec<Candidate>,
    /// Highest predicted points regardless of price.
    pub highest_predicted: Vec<Candidate>,
    /// Affordable candidates owned by fewer than 5% of managers, best value first.
    pub differentials: Vec<Candidate>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.best_value.is_empty() && self.highest_predicted.is_empty() && self.differentials.is_empty()
    }
}

/// Build the three transfer shortlists.
///
/// Candidates predicted at or below `min_points` are ignored; "affordable"
/// means priced at or below `max_price`. Each list holds at most `top_n`
/// distinct players.
pub fn transfer_recommendations(
    candidates: &[Candidate],
    max_price: Price,
    top_n: usize,
    min_points: f64,
) -> Recommendations {
    let mut seen = HashSet::new();
    let mut eligible: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.predicted_points > min_points)
        .filter(|c| seen.insert(c.id))
        .collect();

    eligible.sort_by(|a, b| value_cmp(a, b));
    let affordable: Vec<&Candidate> = eligible.iter().copied().filter(|c| c.price <= max_price).collect();

    let best_value = take_cloned(affordable.iter().copied(), top_n);
    let differentials = take_cloned(
        affordable.iter().copied().filter(|c| c.ownership_pct < DIFFERENTIAL_OWNERSHIP_PCT),
        top_n,
    );

    eligible.sort_by(|a, b| rank_cmp(a, b));
    let highest_predicted = take_cloned(eligible.iter().copied(), top_n);

    Recommendations { best_value, highest_predicted, differentials }
}

fn value_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    b.points_per_price()
        .total_cmp(&a.points_per_price())
        .then_with(|| rank_cmp(a, b))
}

fn take_cloned<'a>(iter: impl Iterator<Item = &'a Candidate>, n: usize) -> Vec<Candidate> {
    iter.take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, position: Position, price: u32, points: f64, ownership: f64) -> Candidate {
        Candidate::new(id, format!("P{id}"), id, position, Price(price), points)
            .unwrap()
            .with_ownership(ownership)
            .unwrap()
    }

    fn pool() -> Vec<Candidate> {
        vec![
            player(1, Position::Mid, 130, 9.0, 55.0),
            player(2, Position::Mid, 60, 6.0, 3.0),
            player(3, Position::Fwd, 90, 7.5, 12.0),
            player(4, Position::Def, 45, 4.5, 1.5),
            player(5, Position::Def, 40, 2.5, 0.5),
            player(6, Position::Gk, 50, 4.0, 20.0),
        ]
    }

    #[test]
    fn best_by_position_ranks_each_group() {
        let best = best_by_position(&pool(), 1);
        assert_eq!(best[&Position::Def][0].id.0, 4);
        assert_eq!(best[&Position::Mid][0].id.0, 1);
        assert_eq!(best[&Position::Gk].len(), 1);
        assert_eq!(best.len(), 4);
    }

    #[test]
    fn lists_respect_price_points_and_ownership() {
        let recs = transfer_recommendations(&pool(), Price(100), 3, DEFAULT_MIN_POINTS);

        // Value: P2 0.100, P4 0.100 (tie broken by points), P3 0.083, P6 0.080.
        let value: Vec<u32> = recs.best_value.iter().map(|c| c.id.0).collect();
        assert_eq!(value, vec![2, 4, 3]);

        // Highest predicted ignores the price cap.
        let top: Vec<u32> = recs.highest_predicted.iter().map(|c| c.id.0).collect();
        assert_eq!(top, vec![1, 3, 2]);

        // P5 is a differential but below the points floor.
        let diffs: Vec<u32> = recs.differentials.iter().map(|c| c.id.0).collect();
        assert_eq!(diffs, vec![2, 4]);
    }

    #[test]
    fn duplicate_ids_listed_once() {
        let mut candidates = pool();
        candidates.push(candidates[1].clone());
        let recs = transfer_recommendations(&candidates, Price(100), 5, DEFAULT_MIN_POINTS);
        let twos = recs.best_value.iter().filter(|c| c.id.0 == 2).count();
        assert_eq!(twos, 1);
    }

    #[test]
    fn nothing_above_floor_is_empty() {
        let recs = transfer_recommendations(&pool(), Price(100), 3, 50.0);
        assert!(recs.is_empty());
    }
}
