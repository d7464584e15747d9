use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Playing position. Declaration order is the order quotas are filled and
/// lineups are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    #[serde(alias = "GKP")]
    Gk,
    Def,
    Mid,
    Fwd,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Gk, Position::Def, Position::Mid, Position::Fwd];

    /// The outfield positions, in formation order (D-M-F).
    pub const OUTFIELD: [Position; 3] = [Position::Def, Position::Mid, Position::Fwd];

    pub fn index(self) -> usize {
        match self {
            Position::Gk => 0,
            Position::Def => 1,
            Position::Mid => 2,
            Position::Fwd => 3,
        }
    }

    /// FPL `element_type` code (1 = GK … 4 = FWD).
    pub fn from_element_type(code: u8) -> Option<Self> {
        match code {
            1 => Some(Position::Gk),
            2 => Some(Position::Def),
            3 => Some(Position::Mid),
            4 => Some(Position::Fwd),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Gk => "GK",
            Position::Def => "DEF",
            Position::Mid => "MID",
            Position::Fwd => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown position '{0}' (expected GK, DEF, MID, FWD or 1-4)")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" | "GKP" | "G" | "1" => Ok(Position::Gk),
            "DEF" | "D" | "2" => Ok(Position::Def),
            "MID" | "M" | "3" => Ok(Position::Mid),
            "FWD" | "F" | "ATT" | "4" => Ok(Position::Fwd),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_element_codes() {
        assert_eq!("gk".parse::<Position>().unwrap(), Position::Gk);
        assert_eq!("GKP".parse::<Position>().unwrap(), Position::Gk);
        assert_eq!("3".parse::<Position>().unwrap(), Position::Mid);
        assert_eq!(" fwd ".parse::<Position>().unwrap(), Position::Fwd);
        assert!("striker".parse::<Position>().is_err());
    }

    #[test]
    fn element_type_mapping() {
        assert_eq!(Position::from_element_type(2), Some(Position::Def));
        assert_eq!(Position::from_element_type(5), None);
    }

    #[test]
    fn serde_uses_short_labels() {
        assert_eq!(serde_json::to_string(&Position::Def).unwrap(), "\"DEF\"");
        let p: Position = serde_json::from_str("\"GKP\"").unwrap();
        assert_eq!(p, Position::Gk);
    }
}
