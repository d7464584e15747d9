//! Per-position candidate pools with precomputed price reserves.

use crate::domain::{Candidate, Position, Price};

use super::ordering::rank_cmp;

/// Candidates for one position, ranked by [`rank_cmp`].
pub(crate) struct PositionPool<'a> {
    pub position: Position,
    pub quota: usize,
    pub ranked: Vec<&'a Candidate>,
    /// `suffix_cheapest[i]`: ascending prices of the `quota` cheapest players in `ranked[i..]`.
    suffix_cheapest: Vec<Vec<Price>>,
}

impl<'a> PositionPool<'a> {
    pub fn new(position: Position, quota: usize, mut members: Vec<&'a Candidate>) -> Self {
        members.sort_by(|a, b| rank_cmp(a, b));

        let n = members.len();
        let mut suffix_cheapest: Vec<Vec<Price>> = vec![Vec::new(); n + 1];
        for i in (0..n).rev() {
            let mut cheapest = suffix_cheapest[i + 1].clone();
            let price = members[i].price;
            let at = cheapest.partition_point(|&p| p <= price);
            cheapest.insert(at, price);
            cheapest.truncate(quota);
            suffix_cheapest[i] = cheapest;
        }

        Self { position, quota, ranked: members, suffix_cheapest }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Lower bound on the cost of `need` more players taken from `ranked[from..]`.
    ///
    /// When the suffix holds fewer than `need` players, only those are counted.
    pub fn cheapest_from(&self, from: usize, need: usize) -> Price {
        let from = from.min(self.ranked.len());
        self.suffix_cheapest[from].iter().take(need).sum()
    }

    /// Cost of the `quota` cheapest players.
    pub fn cheapest_fill(&self) -> Price {
        self.cheapest_from(0, self.quota)
    }

    /// Cost of the `quota` most expensive players.
    pub fn dearest_fill(&self) -> Price {
        let mut prices: Vec<Price> = self.ranked.iter().map(|c| c.price).collect();
        prices.sort_unstable_by(|a, b| b.cmp(a));
        prices.into_iter().take(self.quota).sum()
    }
}
