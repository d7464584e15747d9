//! Run parameters for squad selection.

use serde::{Deserialize, Serialize};

use crate::domain::{Formation, Position, Price, OUTFIELD_STARTERS};
use crate::error::SelectionError;

/// Players in a full squad.
pub const SQUAD_SIZE: usize = 15;

/// Exact number of players required per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionQuotas {
    pub gk: usize,
    pub def: usize,
    pub mid: usize,
    pub fwd: usize,
}

impl PositionQuotas {
    pub fn get(&self, position: Position) -> usize {
        match position {
            Position::Gk => self.gk,
            Position::Def => self.def,
            Position::Mid => self.mid,
            Position::Fwd => self.fwd,
        }
    }

    pub fn total(&self) -> usize {
        self.gk + self.def + self.mid + self.fwd
    }
}

impl Default for PositionQuotas {
    fn default() -> Self {
        Self { gk: 2, def: 5, mid: 5, fwd: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub budget: Price,
    pub quotas: PositionQuotas,
    pub max_per_team: usize,
    /// Valid starting-XI splits, in preference order for tie-breaks.
    pub formations: Vec<Formation>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            budget: Price::from_tenths(1000),
            quotas: PositionQuotas::default(),
            max_per_team: 3,
            formations: Formation::default_whitelist(),
        }
    }
}

impl ConstraintSet {
    pub fn with_budget(mut self, budget: Price) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_per_team(mut self, max_per_team: usize) -> Self {
        self.max_per_team = max_per_team;
        self
    }

    pub fn with_formations(mut self, formations: Vec<Formation>) -> Self {
        self.formations = formations;
        self
    }

    /// Reject parameter sets no squad could ever satisfy structurally.
    ///
    /// Formation fieldability against the quotas is not checked here; that is
    /// reported as `Infeasibility::Formation` by the optimizer.
    pub fn validate(&self) -> Result<(), SelectionError> {
        let invalid = |reason: String| SelectionError::InvalidConstraints { reason };

        if self.quotas.total() != SQUAD_SIZE {
            return Err(invalid(format!(
                "position quotas sum to {}, expected {SQUAD_SIZE}",
                self.quotas.total()
            )));
        }
        if self.quotas.gk == 0 {
            return Err(invalid("goalkeeper quota must be at least 1".into()));
        }
        if self.max_per_team == 0 {
            return Err(invalid("max_per_team must be at least 1".into()));
        }
        if self.formations.is_empty() {
            return Err(invalid("formation whitelist is empty".into()));
        }
        if let Some(bad) = self.formations.iter().find(|f| f.outfield_total() != OUTFIELD_STARTERS) {
            return Err(invalid(format!(
                "formation {bad} has {} outfield players, expected {OUTFIELD_STARTERS}",
                bad.outfield_total()
            )));
        }
        Ok(())
    }

    /// Whitelisted formations the quotas can field, in whitelist order.
    pub fn fieldable_formations(&self) -> Vec<Formation> {
        self.formations
            .iter()
            .copied()
            .filter(|f| Position::OUTFIELD.iter().all(|&p| f.count(p) <= self.quotas.get(p)))
            .collect()
    }
}
