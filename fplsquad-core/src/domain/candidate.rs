use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{CandidateId, Position, Price, TeamId};
use crate::error::SelectionError;

/// Whether a player is expected to be able to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Fit,
    Injured,
    Suspended,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Fit
    }

    /// Map an FPL `status` code. Doubtful (`d`), unavailable (`u`) and
    /// not-in-league (`n`) players count as injured.
    pub fn from_fpl_status(status: &str) -> Self {
        match status {
            "a" => Availability::Fit,
            "s" => Availability::Suspended,
            _ => Availability::Injured,
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "fit" | "a" | "available" => Ok(Availability::Fit),
            "injured" | "i" | "d" | "doubtful" | "u" | "n" => Ok(Availability::Injured),
            "suspended" | "s" => Ok(Availability::Suspended),
            other => Err(format!("unknown availability '{other}'")),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Availability::Fit => "fit",
            Availability::Injured => "injured",
            Availability::Suspended => "suspended",
        };
        f.write_str(s)
    }
}

/// One scored player considered for selection.
///
/// Constructed through [`Candidate::new`] or from a [`CandidateRecord`], both
/// of which enforce price > 0, finite points, and ownership within 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub team: TeamId,
    pub position: Position,
    pub price: Price,
    pub predicted_points: f64,
    pub ownership_pct: f64,
    pub availability: Availability,
}

impl Candidate {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        team: u32,
        position: Position,
        price: Price,
        predicted_points: f64,
    ) -> Result<Self, SelectionError> {
        let candidate = Self {
            id: CandidateId(id),
            name: name.into(),
            team: TeamId(team),
            position,
            price,
            predicted_points,
            ownership_pct: 0.0,
            availability: Availability::Fit,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    pub fn with_ownership(mut self, ownership_pct: f64) -> Result<Self, SelectionError> {
        self.ownership_pct = ownership_pct;
        self.validate()?;
        Ok(self)
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Predicted points per unit of price.
    pub fn points_per_price(&self) -> f64 {
        self.predicted_points / self.price.as_units()
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    /// Check the field invariants. Public fields can be edited after
    /// construction, so pool boundaries call this again.
    pub fn validate(&self) -> Result<(), SelectionError> {
        let invalid = |field: &'static str, reason: String| SelectionError::InvalidCandidate {
            id: Some(self.id.0),
            field,
            reason,
        };
        if self.price.is_zero() {
            return Err(invalid("price", "must be greater than zero".into()));
        }
        if !self.predicted_points.is_finite() {
            return Err(invalid("predicted_points", format!("not finite: {}", self.predicted_points)));
        }
        if !(0.0..=100.0).contains(&self.ownership_pct) {
            return Err(invalid("ownership_pct", format!("{} outside 0-100", self.ownership_pct)));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "empty".into()));
        }
        Ok(())
    }
}

/// Unvalidated candidate as it arrives from a pool file.
///
/// Every field is optional so that a missing column surfaces as an
/// `InvalidCandidate` naming the field instead of a generic parse error.
/// Price is in units (`7.5`), not tenths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub team: Option<u32>,
    pub position: Option<String>,
    pub price: Option<f64>,
    pub predicted_points: Option<f64>,
    pub ownership_pct: Option<f64>,
    pub availability: Option<String>,
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = SelectionError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        let id = record.id;
        let missing = |field: &'static str| SelectionError::InvalidCandidate {
            id,
            field,
            reason: "missing".into(),
        };
        let bad = |field: &'static str, reason: String| SelectionError::InvalidCandidate {
            id,
            field,
            reason,
        };

        let candidate_id = id.ok_or_else(|| missing("id"))?;
        let name = record.name.filter(|n| !n.trim().is_empty()).ok_or_else(|| missing("name"))?;
        let team = record.team.ok_or_else(|| missing("team"))?;
        let position = record
            .position
            .as_deref()
            .ok_or_else(|| missing("position"))?
            .parse::<Position>()
            .map_err(|e| bad("position", e.to_string()))?;
        let price_units = record.price.ok_or_else(|| missing("price"))?;
        let price = Price::from_units(price_units)
            .ok_or_else(|| bad("price", format!("invalid amount {price_units}")))?;
        let predicted_points = record.predicted_points.ok_or_else(|| missing("predicted_points"))?;
        let availability = match record.availability.as_deref() {
            Some(s) => s.parse::<Availability>().map_err(|e| bad("availability", e))?,
            None => Availability::Fit,
        };

        let candidate = Candidate {
            id: CandidateId(candidate_id),
            name,
            team: TeamId(team),
            position,
            price,
            predicted_points,
            ownership_pct: record.ownership_pct.unwrap_or(0.0),
            availability,
        };
        candidate.validate()?;
        Ok(candidate)
    }
}

impl From<&Candidate> for CandidateRecord {
    fn from(c: &Candidate) -> Self {
        Self {
            id: Some(c.id.0),
            name: Some(c.name.clone()),
            team: Some(c.team.0),
            position: Some(c.position.label().to_string()),
            price: Some(c.price.as_units()),
            predicted_points: Some(c.predicted_points),
            ownership_pct: Some(c.ownership_pct),
            availability: Some(c.availability.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CandidateRecord {
        CandidateRecord {
            id: Some(10),
            name: Some("Saka".into()),
            team: Some(1),
            position: Some("MID".into()),
            price: Some(10.0),
            predicted_points: Some(6.4),
            ownership_pct: Some(35.2),
            availability: None,
        }
    }

    fn field_of(err: SelectionError) -> &'static str {
        match err {
            SelectionError::InvalidCandidate { field, .. } => field,
            other => panic!("expected InvalidCandidate, got {other:?}"),
        }
    }

    #[test]
    fn valid_record_converts() {
        let c = Candidate::try_from(record()).unwrap();
        assert_eq!(c.id, CandidateId(10));
        assert_eq!(c.price, Price(100));
        assert_eq!(c.position, Position::Mid);
        assert_eq!(c.availability, Availability::Fit);
        assert!((c.points_per_price() - 0.64).abs() < 1e-12);
    }

    #[test]
    fn missing_fields_are_named() {
        let mut r = record();
        r.price = None;
        assert_eq!(field_of(Candidate::try_from(r).unwrap_err()), "price");

        let mut r = record();
        r.position = None;
        assert_eq!(field_of(Candidate::try_from(r).unwrap_err()), "position");

        let mut r = record();
        r.predicted_points = None;
        assert_eq!(field_of(Candidate::try_from(r).unwrap_err()), "predicted_points");
    }

    #[test]
    fn zero_price_rejected() {
        let mut r = record();
        r.price = Some(0.0);
        assert_eq!(field_of(Candidate::try_from(r).unwrap_err()), "price");
    }

    #[test]
    fn ownership_out_of_range_rejected() {
        let mut r = record();
        r.ownership_pct = Some(140.0);
        assert_eq!(field_of(Candidate::try_from(r).unwrap_err()), "ownership_pct");
    }

    #[test]
    fn negative_points_allowed() {
        let mut r = record();
        r.predicted_points = Some(-1.0);
        assert!(Candidate::try_from(r).is_ok());
    }

    #[test]
    fn availability_codes() {
        let mut r = record();
        r.availability = Some("d".into());
        assert_eq!(Candidate::try_from(r).unwrap().availability, Availability::Injured);
        assert_eq!(Availability::from_fpl_status("s"), Availability::Suspended);
        assert_eq!(Availability::from_fpl_status("a"), Availability::Fit);
    }
}
