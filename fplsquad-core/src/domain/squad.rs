use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Candidate, CandidateId, Formation, Position, Price, TeamId};

/// The optimizer's output: 15 players split into a starting XI and bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    /// All selected players, grouped by position (GK, DEF, MID, FWD).
    pub players: Vec<Candidate>,
    pub total_spend: Price,
    pub budget: Price,
    pub formation: Formation,
    /// GK first, then defenders, midfielders, forwards.
    pub starting_xi: Vec<Candidate>,
    /// Substitution priority order; the reserve goalkeeper is last.
    pub bench: Vec<Candidate>,
    pub captain: CandidateId,
    pub vice_captain: CandidateId,
    /// Set when unavailable players had to be included to reach a feasible squad.
    pub risk_adjusted: bool,
}

impl Squad {
    /// Sum of predicted points over all selected players.
    pub fn squad_points(&self) -> f64 {
        self.players.iter().map(|c| c.predicted_points).sum()
    }

    /// Sum of predicted points over the starting XI.
    pub fn starting_points(&self) -> f64 {
        self.starting_xi.iter().map(|c| c.predicted_points).sum()
    }

    /// Starting XI points with the captain counted twice.
    pub fn projected_points(&self) -> f64 {
        self.starting_points() + self.captain().map_or(0.0, |c| c.predicted_points)
    }

    pub fn remaining_budget(&self) -> Price {
        self.budget.saturating_sub(self.total_spend)
    }

    pub fn captain(&self) -> Option<&Candidate> {
        self.starting_xi.iter().find(|c| c.id == self.captain)
    }

    pub fn vice_captain(&self) -> Option<&Candidate> {
        self.starting_xi.iter().find(|c| c.id == self.vice_captain)
    }

    pub fn team_counts(&self) -> BTreeMap<TeamId, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.players {
            *counts.entry(c.team).or_insert(0) += 1;
        }
        counts
    }

    pub fn position_counts(&self) -> BTreeMap<Position, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.players {
            *counts.entry(c.position).or_insert(0) += 1;
        }
        counts
    }

    pub fn players_at(&self, position: Position) -> impl Iterator<Item = &Candidate> {
        self.players.iter().filter(move |c| c.position == position)
    }

    pub fn starters_at(&self, position: Position) -> impl Iterator<Item = &Candidate> {
        self.starting_xi.iter().filter(move |c| c.position == position)
    }

    pub fn is_starter(&self, id: CandidateId) -> bool {
        self.starting_xi.iter().any(|c| c.id == id)
    }
}
