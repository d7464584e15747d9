//! Deterministic candidate ordering.

use std::cmp::Ordering;

use crate::domain::Candidate;

/// Selection preference within a position: predicted points desc, then
/// points-per-price desc, then price asc, then id asc.
///
/// Total over all candidates with distinct ids, so every sort using it is
/// reproducible.
pub fn rank_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    b.predicted_points
        .total_cmp(&a.predicted_points)
        .then_with(|| b.points_per_price().total_cmp(&a.points_per_price()))
        .then_with(|| a.price.cmp(&b.price))
        .then_with(|| a.id.cmp(&b.id))
}

/// Captaincy preference: predicted points desc, then lower ownership (the
/// differential pick), then [`rank_cmp`].
pub fn captaincy_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    b.predicted_points
        .total_cmp(&a.predicted_points)
        .then_with(|| a.ownership_pct.total_cmp(&b.ownership_pct))
        .then_with(|| rank_cmp(a, b))
}
