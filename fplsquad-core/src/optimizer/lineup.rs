//! Starting XI, bench order and captaincy for a selected squad.

use std::cmp::Ordering;

use crate::domain::{Candidate, CandidateId, Formation, Position, Price};
use crate::error::{Infeasibility, SelectionError};

use super::ordering::{captaincy_cmp, rank_cmp};

#[derive(Debug, Clone)]
pub(crate) struct Lineup {
    pub formation: Formation,
    pub starting_xi: Vec<Candidate>,
    pub bench: Vec<Candidate>,
    pub captain: CandidateId,
    pub vice_captain: CandidateId,
}

/// Pick the lineup for `by_position` (selected players per position, each in
/// rank order, indexed by `Position::index`).
///
/// Every fieldable formation is scored by taking the top-ranked players at each
/// outfield position; the best XI points wins, ties go to the cheaper XI and
/// then to the earlier whitelist entry.
pub(crate) fn pick_lineup(
    by_position: &[Vec<&Candidate>; 4],
    formations: &[Formation],
) -> Result<Lineup, SelectionError> {
    let keepers = &by_position[Position::Gk.index()];
    let Some(&starting_gk) = keepers.first() else {
        return Err(SelectionError::InsufficientCandidates { position: Position::Gk });
    };

    let mut best: Option<(Formation, f64, Price)> = None;
    for &formation in formations {
        let fieldable = Position::OUTFIELD
            .iter()
            .all(|&p| by_position[p.index()].len() >= formation.count(p));
        if !fieldable {
            continue;
        }

        let outfield = move || {
            Position::OUTFIELD
                .iter()
                .flat_map(move |&p| by_position[p.index()].iter().take(formation.count(p)))
        };
        let points: f64 = outfield().map(|c| c.predicted_points).sum();
        let price: Price = outfield().map(|c| c.price).sum();

        let better = match &best {
            None => true,
            Some((_, best_points, best_price)) => match points.total_cmp(best_points) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => price < *best_price,
            },
        };
        if better {
            best = Some((formation, points, price));
        }
    }
    let Some((formation, _, _)) = best else {
        return Err(SelectionError::infeasible(Infeasibility::Formation));
    };

    let mut starting_xi: Vec<Candidate> = vec![starting_gk.clone()];
    let mut bench_outfield: Vec<&Candidate> = Vec::new();
    for &p in &Position::OUTFIELD {
        let players = &by_position[p.index()];
        let starters = formation.count(p);
        starting_xi.extend(players.iter().take(starters).map(|&c| c.clone()));
        bench_outfield.extend(players.iter().skip(starters));
    }

    bench_outfield.sort_by(|a, b| rank_cmp(a, b));
    let mut bench: Vec<Candidate> = bench_outfield.into_iter().cloned().collect();
    // Goalkeepers never come on for outfielders, so reserve keepers go last.
    bench.extend(keepers.iter().skip(1).map(|&c| c.clone()));

    let mut armband: Vec<&Candidate> = starting_xi.iter().collect();
    armband.sort_by(|a, b| captaincy_cmp(a, b));
    let captain = armband[0].id;
    let vice_captain = armband[1].id;

    Ok(Lineup { formation, starting_xi, bench, captain, vice_captain })
}
