//! Whether open quota slots can still be filled under the per-team cap.
//!
//! Each unpicked player is one unit of supply from a club to a position. The
//! open slots are fillable iff, for every subset `S` of positions,
//!
//! ```text
//! Σ_club min(room(club), supply(club, S)) >= need(S)
//! ```
//!
//! which is the min-cut condition of the club → position flow network. With
//! four positions that is sixteen subsets.

use std::collections::HashMap;

use crate::domain::TeamId;

use super::pool::PositionPool;

/// Remaining room and per-position supply of one club.
#[derive(Debug, Clone)]
pub(crate) struct ClubSupply {
    pub room: usize,
    pub per_position: Vec<usize>,
}

/// `need[p]` open slots per pool; `clubs` the clubs that can still supply them.
pub(crate) fn slots_fillable(need: &[usize], clubs: &[ClubSupply]) -> bool {
    let positions = need.len();
    (1usize..1 << positions).all(|subset| {
        let in_subset = |p: &usize| subset & (1 << p) != 0;
        let demand: usize = (0..positions).filter(in_subset).map(|p| need[p]).sum();
        if demand == 0 {
            return true;
        }
        let supply: usize = clubs
            .iter()
            .map(|club| {
                let available: usize = (0..positions).filter(in_subset).map(|p| club.per_position[p]).sum();
                available.min(club.room)
            })
            .sum();
        supply >= demand
    })
}

/// Group the players `open(pool, idx)` admits by club.
pub(crate) fn club_supply(
    pools: &[PositionPool<'_>],
    max_per_team: usize,
    used: impl Fn(TeamId) -> usize,
    open: impl Fn(usize, usize) -> bool,
) -> Vec<ClubSupply> {
    let mut by_team: HashMap<TeamId, Vec<usize>> = HashMap::new();
    for (p, pool) in pools.iter().enumerate() {
        for (idx, c) in pool.ranked.iter().enumerate() {
            if open(p, idx) {
                by_team.entry(c.team).or_insert_with(|| vec![0; pools.len()])[p] += 1;
            }
        }
    }
    by_team
        .into_iter()
        .map(|(team, per_position)| ClubSupply {
            room: max_per_team.saturating_sub(used(team)),
            per_position,
        })
        .collect()
}

/// Whether any full squad exists once budget is ignored.
pub(crate) fn cap_admits_squad(pools: &[PositionPool<'_>], max_per_team: usize) -> bool {
    let need: Vec<usize> = pools.iter().map(|p| p.quota).collect();
    let clubs = club_supply(pools, max_per_team, |_| 0, |_, _| true);
    slots_fillable(&need, &clubs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, Position, Price};

    fn player(id: u32, team: u32, position: Position) -> Candidate {
        Candidate::new(id, format!("P{id}"), team, position, Price(50), 5.0).unwrap()
    }

    fn club(room: usize, per_position: &[usize]) -> ClubSupply {
        ClubSupply { room, per_position: per_position.to_vec() }
    }

    #[test]
    fn shared_club_limits_combined_positions() {
        // Club 1 can give three players in total, not three per position.
        let clubs = [club(3, &[3, 3]), club(3, &[0, 2])];
        assert!(slots_fillable(&[2, 2], &clubs));
        assert!(slots_fillable(&[1, 4], &clubs));
        assert!(!slots_fillable(&[3, 3], &clubs));
    }

    #[test]
    fn nothing_open_is_trivially_fillable() {
        assert!(slots_fillable(&[0, 0, 0, 0], &[]));
        assert!(!slots_fillable(&[1, 0, 0, 0], &[]));
    }

    #[test]
    fn whole_pool_check() {
        let players = vec![
            player(1, 1, Position::Def),
            player(2, 1, Position::Def),
            player(3, 1, Position::Mid),
            player(4, 2, Position::Mid),
        ];
        let pools = |quota: usize| {
            vec![
                PositionPool::new(Position::Def, quota, players.iter().filter(|c| c.position == Position::Def).collect()),
                PositionPool::new(Position::Mid, 1, players.iter().filter(|c| c.position == Position::Mid).collect()),
            ]
        };
        assert!(cap_admits_squad(&pools(2), 2));
        assert!(!cap_admits_squad(&pools(2), 1));
        assert!(cap_admits_squad(&pools(1), 1));
    }
}
