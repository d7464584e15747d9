//! FPL bootstrap data: parse a saved `bootstrap-static` response and score it.
//!
//! The file holds the API's `elements` (players) and `teams` arrays. A
//! `fixtures` array (the API's fixtures endpoint) may be merged in; without
//! it every team gets neutral fixture and strength scores.

use std::collections::BTreeMap;

use fplsquad_core::scoring::{predict_points, FixtureResult, MatchContext, PlayerStats, UpcomingFixture};
use fplsquad_core::{Availability, Candidate, Position, Price, SelectionError, TeamId};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FplDataError {
    #[error("parse bootstrap JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("player {id}: unknown element_type {element_type}")]
    UnknownElementType { id: u32, element_type: u8 },
    #[error("player {id}: {source}")]
    InvalidPlayer {
        id: u32,
        #[source]
        source: SelectionError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    #[serde(default)]
    pub web_name: String,
    pub team: u32,
    pub element_type: u8,
    /// Price in tenths.
    pub now_cost: u32,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default, deserialize_with = "percent")]
    pub selected_by_percent: f64,
    #[serde(default)]
    pub status: String,
}

impl Element {
    pub fn display_name(&self) -> String {
        if !self.web_name.trim().is_empty() {
            return self.web_name.clone();
        }
        format!("{} {}", self.first_name, self.second_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub team_h: u32,
    pub team_a: u32,
    #[serde(default)]
    pub team_h_score: Option<u32>,
    #[serde(default)]
    pub team_a_score: Option<u32>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default = "default_difficulty")]
    pub team_h_difficulty: u8,
    #[serde(default = "default_difficulty")]
    pub team_a_difficulty: u8,
}

fn default_difficulty() -> u8 {
    3
}

/// The API sends ownership as a string (`"12.3"`); saved files sometimes hold a number.
fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

impl Bootstrap {
    pub fn from_json(content: &str) -> Result<Self, FplDataError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn team_names(&self) -> BTreeMap<TeamId, String> {
        self.teams.iter().map(|t| (TeamId(t.id), t.name.clone())).collect()
    }

    /// Team form and fixture difficulty from the fixtures list.
    pub fn match_context(&self) -> MatchContext {
        let mut results = Vec::new();
        let mut upcoming = Vec::new();
        for f in &self.fixtures {
            match (f.finished, f.team_h_score, f.team_a_score) {
                (true, Some(home_score), Some(away_score)) => results.push(FixtureResult {
                    home: TeamId(f.team_h),
                    away: TeamId(f.team_a),
                    home_score,
                    away_score,
                }),
                (true, _, _) => {}
                (false, _, _) => upcoming.push(UpcomingFixture {
                    home: TeamId(f.team_h),
                    away: TeamId(f.team_a),
                    home_difficulty: f.team_h_difficulty,
                    away_difficulty: f.team_a_difficulty,
                }),
            }
        }
        MatchContext::from_fixtures(&results, &upcoming)
    }

    /// Score every player and convert to candidates.
    pub fn to_candidates(&self) -> Result<Vec<Candidate>, FplDataError> {
        let ctx = self.match_context();
        debug!(
            players = self.elements.len(),
            teams_with_form = ctx.team_form.len(),
            teams_with_fixtures = ctx.avg_difficulty.len(),
            "scoring bootstrap players"
        );
        self.elements.iter().map(|e| score_element(e, &ctx)).collect()
    }
}

fn score_element(e: &Element, ctx: &MatchContext) -> Result<Candidate, FplDataError> {
    let position = Position::from_element_type(e.element_type).ok_or(FplDataError::UnknownElementType {
        id: e.id,
        element_type: e.element_type,
    })?;
    let availability = Availability::from_fpl_status(&e.status);
    let ownership = e.selected_by_percent.clamp(0.0, 100.0);
    let stats = PlayerStats {
        team: TeamId(e.team),
        position,
        total_points: f64::from(e.total_points),
        minutes: e.minutes,
        ownership_pct: ownership,
        availability,
    };
    let prediction = predict_points(&stats, ctx);

    let invalid = |source| FplDataError::InvalidPlayer { id: e.id, source };
    Candidate::new(e.id, e.display_name(), e.team, position, Price::from_tenths(e.now_cost), prediction.predicted_points)
        .and_then(|c| c.with_ownership(ownership))
        .map(|c| c.with_availability(availability))
        .map_err(invalid)
}
