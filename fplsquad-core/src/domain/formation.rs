use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::Position;

/// Outfield players in a starting XI.
pub const OUTFIELD_STARTERS: usize = 10;

/// Starting-XI outfield split, defenders-midfielders-forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Formation {
    pub def: u8,
    pub mid: u8,
    pub fwd: u8,
}

impl Formation {
    pub const fn new(def: u8, mid: u8, fwd: u8) -> Self {
        Self { def, mid, fwd }
    }

    /// Starters required at `position` (always 1 for GK).
    pub fn count(&self, position: Position) -> usize {
        match position {
            Position::Gk => 1,
            Position::Def => self.def as usize,
            Position::Mid => self.mid as usize,
            Position::Fwd => self.fwd as usize,
        }
    }

    pub fn outfield_total(&self) -> usize {
        self.def as usize + self.mid as usize + self.fwd as usize
    }

    /// The standard FPL whitelist.
    pub fn default_whitelist() -> Vec<Formation> {
        vec![
            Formation::new(3, 4, 3),
            Formation::new(3, 5, 2),
            Formation::new(4, 3, 3),
            Formation::new(4, 4, 2),
            Formation::new(4, 5, 1),
            Formation::new(5, 3, 2),
            Formation::new(5, 4, 1),
        ]
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.def, self.mid, self.fwd)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid formation '{0}' (expected D-M-F, e.g. 4-4-2)")]
pub struct ParseFormationError(pub String);

impl FromStr for Formation {
    type Err = ParseFormationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(ParseFormationError(s.to_string()));
        }
        let mut counts = [0u8; 3];
        for (slot, part) in counts.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| ParseFormationError(s.to_string()))?;
        }
        Ok(Formation::new(counts[0], counts[1], counts[2]))
    }
}

impl TryFrom<String> for Formation {
    type Error = ParseFormationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Formation> for String {
    fn from(f: Formation) -> String {
        f.to_string()
    }
}
