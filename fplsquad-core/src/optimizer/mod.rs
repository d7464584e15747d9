//! Squad optimizer.
//!
//! `select_squad` picks 15 players under the budget, position quotas and
//! per-team cap, then derives the starting XI, bench order, captain and
//! vice-captain. The selection heuristic is a greedy pass with swap repair
//! and swap upgrades (see [`pass`]), run over a ladder of spend ceilings:
//! every ceiling from the budget down to the cheapest possible squad is
//! tried and the best squad kept. Any squad found under a smaller budget is
//! therefore also available under a larger one, so raising the budget never
//! lowers the result. Pools the team cap rules out altogether are reported
//! as `TeamCap` before any pass runs.
//!
//! The function is pure. Unavailable players are excluded unless no squad
//! can be built without them, in which case the squad is flagged
//! `risk_adjusted`.

mod clubs;
mod lineup;
mod ordering;
mod pass;
mod pool;

pub use ordering::{captaincy_cmp, rank_cmp};

use std::collections::HashSet;

use tracing::debug;

use crate::constraints::ConstraintSet;
use crate::domain::{Candidate, Position, Price, Squad};
use crate::error::{Infeasibility, SelectionError};

use lineup::pick_lineup;
use pass::{run_pass, Selection};
use pool::PositionPool;

/// Select a 15-player squad from `candidates` under `constraints`.
///
/// # Errors
/// - `InvalidConstraints` if the constraint set is structurally invalid.
/// - `InvalidCandidate` for a candidate violating its invariants or a duplicate id.
/// - `InsufficientCandidates` when a position has fewer candidates than its quota.
/// - `InfeasibleConstraints` naming the budget, team cap or formation limit.
pub fn select_squad(
    candidates: &[Candidate],
    constraints: &ConstraintSet,
) -> Result<Squad, SelectionError> {
    constraints.validate()?;
    validate_pool(candidates)?;

    let available: Vec<&Candidate> = candidates.iter().filter(|c| c.is_available()).collect();
    match optimize(&available, constraints) {
        Ok(squad) => Ok(squad),
        Err(err) if err.is_pool_shortage() && available.len() < candidates.len() => {
            debug!(
                error = %err,
                excluded = candidates.len() - available.len(),
                "no squad from available players alone, admitting injured and suspended players"
            );
            let everyone: Vec<&Candidate> = candidates.iter().collect();
            let mut squad = optimize(&everyone, constraints)?;
            squad.risk_adjusted = true;
            Ok(squad)
        }
        Err(err) => Err(err),
    }
}

/// Check every candidate's invariants and reject duplicate ids.
pub fn validate_pool(candidates: &[Candidate]) -> Result<(), SelectionError> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for c in candidates {
        c.validate()?;
        if !seen.insert(c.id) {
            return Err(SelectionError::InvalidCandidate {
                id: Some(c.id.0),
                field: "id",
                reason: "duplicate".into(),
            });
        }
    }
    Ok(())
}

fn optimize(candidates: &[&Candidate], constraints: &ConstraintSet) -> Result<Squad, SelectionError> {
    if constraints.fieldable_formations().is_empty() {
        return Err(SelectionError::infeasible(Infeasibility::Formation));
    }

    let pools: Vec<PositionPool<'_>> = Position::ALL
        .iter()
        .map(|&position| {
            let members = candidates.iter().copied().filter(|c| c.position == position).collect();
            PositionPool::new(position, constraints.quotas.get(position), members)
        })
        .collect();

    if let Some(short) = pools.iter().find(|p| p.len() < p.quota) {
        return Err(SelectionError::InsufficientCandidates { position: short.position });
    }

    if !clubs::cap_admits_squad(&pools, constraints.max_per_team) {
        return Err(SelectionError::infeasible(Infeasibility::TeamCap));
    }

    let floor: Price = pools.iter().map(|p| p.cheapest_fill()).sum();
    if constraints.budget < floor {
        return Err(SelectionError::infeasible(Infeasibility::Budget));
    }
    // Above the dearest possible squad the ceiling no longer binds.
    let dearest: Price = pools.iter().map(|p| p.dearest_fill()).sum();
    let top = constraints.budget.min(dearest);

    let mut best: Option<Selection> = None;
    let mut top_error = None;
    let mut passes = 0usize;
    for tenths in (floor.tenths()..=top.tenths()).rev() {
        let ceiling = Price::from_tenths(tenths);
        passes += 1;
        match run_pass(&pools, constraints.max_per_team, ceiling) {
            Ok(selection) => {
                if best.as_ref().map_or(true, |b| selection.is_better_than(b)) {
                    best = Some(selection);
                }
            }
            Err(err) => {
                if ceiling == top {
                    top_error = Some(err);
                }
            }
        }
    }

    let selection = match (best, top_error) {
        (Some(selection), _) => selection,
        (None, Some(err)) => return Err(err),
        (None, None) => return Err(SelectionError::infeasible(Infeasibility::Budget)),
    };
    debug!(
        floor = %floor,
        top = %top,
        passes,
        spend = %selection.spend,
        points = selection.points,
        "budget ladder complete"
    );

    build_squad(&pools, &selection, constraints)
}

fn build_squad(
    pools: &[PositionPool<'_>],
    selection: &Selection,
    constraints: &ConstraintSet,
) -> Result<Squad, SelectionError> {
    let mut by_position: [Vec<&Candidate>; 4] = Default::default();
    for (pool, picks) in pools.iter().zip(&selection.picks) {
        by_position[pool.position.index()] = picks.iter().map(|&i| pool.ranked[i]).collect();
    }

    let lineup = pick_lineup(&by_position, &constraints.formations)?;
    let players = by_position.iter().flatten().map(|&c| c.clone()).collect();

    Ok(Squad {
        players,
        total_spend: selection.spend,
        budget: constraints.budget,
        formation: lineup.formation,
        starting_xi: lineup.starting_xi,
        bench: lineup.bench,
        captain: lineup.captain,
        vice_captain: lineup.vice_captain,
        risk_adjusted: false,
    })
}
