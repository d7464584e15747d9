//! Typed failures of squad selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::Position;

/// Which constraint made a selection impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Infeasibility {
    /// Even the cheapest quota-satisfying selection costs more than the budget.
    Budget,
    /// The per-team cap leaves too few candidates to fill a position quota.
    TeamCap,
    /// No whitelisted formation can be fielded from the quotas.
    Formation,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Infeasibility::Budget => "budget too small for any squad meeting the position quotas",
            Infeasibility::TeamCap => "per-team cap leaves a position quota unfillable",
            Infeasibility::Formation => "no whitelisted formation fits the position quotas",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("not enough eligible candidates to fill the {position} quota")]
    InsufficientCandidates { position: Position },

    #[error("infeasible constraints: {reason}")]
    InfeasibleConstraints { reason: Infeasibility },

    #[error("invalid candidate{}: field '{field}' {reason}", id_suffix(.id))]
    InvalidCandidate {
        id: Option<u32>,
        field: &'static str,
        reason: String,
    },

    #[error("invalid constraints: {reason}")]
    InvalidConstraints { reason: String },
}

fn id_suffix(id: &Option<u32>) -> String {
    id.map(|i| format!(" {i}")).unwrap_or_default()
}

impl SelectionError {
    pub(crate) fn infeasible(reason: Infeasibility) -> Self {
        SelectionError::InfeasibleConstraints { reason }
    }

    /// Errors that may be resolved by admitting unavailable players.
    pub fn is_pool_shortage(&self) -> bool {
        matches!(
            self,
            SelectionError::InsufficientCandidates { .. } | SelectionError::InfeasibleConstraints { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_limit() {
        let e = SelectionError::InsufficientCandidates { position: Position::Gk };
        assert_eq!(e.to_string(), "not enough eligible candidates to fill the GK quota");

        let e = SelectionError::infeasible(Infeasibility::TeamCap);
        assert!(e.to_string().contains("per-team cap"));

        let e = SelectionError::InvalidCandidate { id: Some(4), field: "price", reason: "missing".into() };
        assert_eq!(e.to_string(), "invalid candidate 4: field 'price' missing");

        let e = SelectionError::InvalidCandidate { id: None, field: "id", reason: "missing".into() };
        assert_eq!(e.to_string(), "invalid candidate: field 'id' missing");
    }
}
