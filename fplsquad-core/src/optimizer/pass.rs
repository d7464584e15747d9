//! One selection pass at a fixed spend ceiling.
//!
//! Three phases:
//! 1. Greedy fill, position by position in quota order, holding back enough
//!    budget to complete the remaining quotas at their cheapest and enough
//!    club slots to complete them under the team cap.
//! 2. Swap repair when the fill had to overshoot the ceiling.
//! 3. Upgrade: single same-position swaps that gain points within the ceiling.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{Candidate, Price, TeamId};
use crate::error::{Infeasibility, SelectionError};

use super::clubs::{club_supply, slots_fillable};
use super::pool::PositionPool;

/// A complete 15-player pick: indices into each pool's `ranked` list.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    /// Per pool, ascending (so in rank order).
    pub picks: Vec<Vec<usize>>,
    pub spend: Price,
    pub points: f64,
}

impl Selection {
    /// Ladder preference: more points, then lower spend.
    pub fn is_better_than(&self, other: &Selection) -> bool {
        match self.points.total_cmp(&other.points) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.spend < other.spend,
        }
    }
}

struct PassState<'p, 'a> {
    pools: &'p [PositionPool<'a>],
    max_per_team: usize,
    ceiling: Price,
    chosen: Vec<Vec<bool>>,
    picks: Vec<Vec<usize>>,
    team_counts: HashMap<TeamId, usize>,
    spend: Price,
}

/// A candidate exchange inside one position pool.
#[derive(Debug, Clone, Copy)]
struct Swap {
    pool: usize,
    out_idx: usize,
    in_idx: usize,
}

impl<'p, 'a> PassState<'p, 'a> {
    fn new(pools: &'p [PositionPool<'a>], max_per_team: usize, ceiling: Price) -> Self {
        Self {
            pools,
            max_per_team,
            ceiling,
            chosen: pools.iter().map(|p| vec![false; p.len()]).collect(),
            picks: vec![Vec::new(); pools.len()],
            team_counts: HashMap::new(),
            spend: Price::ZERO,
        }
    }

    fn candidate(&self, pool: usize, idx: usize) -> &'a Candidate {
        self.pools[pool].ranked[idx]
    }

    fn team_count(&self, team: TeamId) -> usize {
        self.team_counts.get(&team).copied().unwrap_or(0)
    }

    fn team_has_room(&self, team: TeamId) -> bool {
        self.team_count(team) < self.max_per_team
    }

    /// Whether swapping `out` for `incoming` keeps every team within the cap.
    fn swap_keeps_cap(&self, out: &Candidate, incoming: &Candidate) -> bool {
        incoming.team == out.team || self.team_has_room(incoming.team)
    }

    /// Whether every other open slot can still be filled under the team cap
    /// after taking `ranked[idx]` of `pool`.
    fn leaves_fillable(&self, pool: usize, idx: usize) -> bool {
        let taken = self.candidate(pool, idx);
        let mut need: Vec<usize> =
            self.pools.iter().zip(&self.picks).map(|(p, picks)| p.quota - picks.len()).collect();
        need[pool] -= 1;
        let clubs = club_supply(
            self.pools,
            self.max_per_team,
            |team| self.team_count(team) + usize::from(team == taken.team),
            |p, i| !self.chosen[p][i] && !(p == pool && i == idx),
        );
        slots_fillable(&need, &clubs)
    }

    fn accept(&mut self, pool: usize, idx: usize) {
        let c = self.candidate(pool, idx);
        self.chosen[pool][idx] = true;
        self.picks[pool].push(idx);
        *self.team_counts.entry(c.team).or_insert(0) += 1;
        self.spend += c.price;
    }

    fn apply(&mut self, swap: Swap) {
        let out = self.candidate(swap.pool, swap.out_idx);
        let incoming = self.candidate(swap.pool, swap.in_idx);

        self.chosen[swap.pool][swap.out_idx] = false;
        self.chosen[swap.pool][swap.in_idx] = true;
        if let Some(slot) = self.picks[swap.pool].iter_mut().find(|i| **i == swap.out_idx) {
            *slot = swap.in_idx;
        }
        if let Some(count) = self.team_counts.get_mut(&out.team) {
            *count = count.saturating_sub(1);
        }
        *self.team_counts.entry(incoming.team).or_insert(0) += 1;
        self.spend = self.spend.saturating_sub(out.price) + incoming.price;
    }

    /// Greedy fill of every quota.
    fn fill(&mut self) -> Result<(), SelectionError> {
        let pools = self.pools;

        // Cheapest completion of all later positions, independent of picks so far.
        let mut later_reserve = vec![Price::ZERO; pools.len()];
        for p in (0..pools.len().saturating_sub(1)).rev() {
            later_reserve[p] = later_reserve[p + 1] + pools[p + 1].cheapest_fill();
        }

        for (p, pool) in pools.iter().enumerate() {
            let mut deferred = Vec::new();

            for idx in 0..pool.len() {
                if self.picks[p].len() == pool.quota {
                    break;
                }
                let c = pool.ranked[idx];
                if !self.team_has_room(c.team) {
                    continue;
                }
                let need_after = pool.quota - self.picks[p].len() - 1;
                let reserve = pool.cheapest_from(idx + 1, need_after) + later_reserve[p];
                if self.spend + c.price + reserve > self.ceiling {
                    deferred.push(idx);
                    continue;
                }
                if self.leaves_fillable(p, idx) {
                    self.accept(p, idx);
                }
            }

            // Budget skips left the quota short: complete it over the ceiling
            // and let the repair phase bring spend back down.
            for idx in deferred {
                if self.picks[p].len() == pool.quota {
                    break;
                }
                if self.team_has_room(pool.ranked[idx].team) && self.leaves_fillable(p, idx) {
                    self.accept(p, idx);
                }
            }

            if self.picks[p].len() < pool.quota {
                return Err(SelectionError::infeasible(Infeasibility::TeamCap));
            }
        }
        Ok(())
    }

    /// Cheapening swaps until spend fits under the ceiling.
    fn repair(&mut self) -> Result<(), SelectionError> {
        while self.spend > self.ceiling {
            let mut best: Option<(Swap, f64, Price)> = None;

            for p in 0..self.pools.len() {
                for &out_idx in &self.picks[p] {
                    let out = self.candidate(p, out_idx);
                    let next = (0..self.pools[p].len()).find(|&i| {
                        let c = self.candidate(p, i);
                        !self.chosen[p][i] && c.price < out.price && self.swap_keeps_cap(out, c)
                    });
                    let Some(in_idx) = next else { continue };

                    let incoming = self.candidate(p, in_idx);
                    let loss = out.predicted_points - incoming.predicted_points;
                    let saving = out.price.saturating_sub(incoming.price);
                    let swap = Swap { pool: p, out_idx, in_idx };

                    let replace = match &best {
                        None => true,
                        Some((current, best_loss, best_saving)) => loss
                            .total_cmp(best_loss)
                            .then_with(|| best_saving.cmp(&saving))
                            .then_with(|| {
                                out.id.cmp(&self.candidate(current.pool, current.out_idx).id)
                            })
                            == Ordering::Less,
                    };
                    if replace {
                        best = Some((swap, loss, saving));
                    }
                }
            }

            match best {
                Some((swap, _, _)) => self.apply(swap),
                None => return Err(SelectionError::infeasible(Infeasibility::Budget)),
            }
        }
        Ok(())
    }

    /// Point-gaining swaps within the ceiling until none is left.
    fn upgrade(&mut self) {
        loop {
            let mut best: Option<(Swap, f64, Price)> = None;

            for p in 0..self.pools.len() {
                for &out_idx in &self.picks[p] {
                    let out = self.candidate(p, out_idx);
                    let headroom = self.ceiling.saturating_sub(self.spend.saturating_sub(out.price));

                    // Ranked by points desc: the first feasible player is the best upgrade for `out`.
                    let mut found = None;
                    for i in 0..self.pools[p].len() {
                        let c = self.candidate(p, i);
                        if c.predicted_points <= out.predicted_points {
                            break;
                        }
                        if !self.chosen[p][i] && c.price <= headroom && self.swap_keeps_cap(out, c) {
                            found = Some(i);
                            break;
                        }
                    }
                    let Some(in_idx) = found else { continue };

                    let incoming = self.candidate(p, in_idx);
                    let gain = incoming.predicted_points - out.predicted_points;
                    let new_spend = self.spend.saturating_sub(out.price) + incoming.price;
                    let swap = Swap { pool: p, out_idx, in_idx };

                    let replace = match &best {
                        None => true,
                        Some((current, best_gain, best_spend)) => best_gain
                            .total_cmp(&gain)
                            .then_with(|| new_spend.cmp(best_spend))
                            .then_with(|| {
                                out.id.cmp(&self.candidate(current.pool, current.out_idx).id)
                            })
                            == Ordering::Less,
                    };
                    if replace {
                        best = Some((swap, gain, new_spend));
                    }
                }
            }

            match best {
                Some((swap, _, _)) => self.apply(swap),
                None => break,
            }
        }
    }

    fn finish(mut self) -> Selection {
        for picks in &mut self.picks {
            picks.sort_unstable();
        }
        let points = self
            .picks
            .iter()
            .enumerate()
            .flat_map(|(p, idxs)| idxs.iter().map(move |&i| (p, i)))
            .map(|(p, i)| self.pools[p].ranked[i].predicted_points)
            .sum();
        Selection { picks: self.picks, spend: self.spend, points }
    }
}

/// Run fill, repair and upgrade at `ceiling`.
pub(crate) fn run_pass(
    pools: &[PositionPool<'_>],
    max_per_team: usize,
    ceiling: Price,
) -> Result<Selection, SelectionError> {
    let mut state = PassState::new(pools, max_per_team, ceiling);
    state.fill()?;
    state.repair()?;
    state.upgrade();
    Ok(state.finish())
}
