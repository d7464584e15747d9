//! Rule-based points model.
//!
//! Turns season statistics and fixture data into a predicted-points figure
//! for one gameweek. Each component score sits on a 0–10 scale:
//!
//! - **form**: points per game against a per-position benchmark
//! - **fixture favorability**: inverted average FPL difficulty of the next five fixtures
//! - **team strength**: goals scored, clean sheets and wins minus a goals-against penalty
//!
//! The weighted blend is scaled into a realistic FPL range, shifted by a
//! per-position baseline and multiplier, and then discounted for players
//! unlikely to get minutes or flagged unavailable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Availability, Position, TeamId};

/// Score used when a team has no fixture or form data.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Most recent finished fixtures considered for team form.
pub const FORM_WINDOW: usize = 50;
/// Upcoming fixtures scanned for difficulty.
pub const UPCOMING_WINDOW: usize = 38;
/// Fixtures per team averaged for difficulty.
pub const DIFFICULTY_HORIZON: usize = 5;

/// Minutes a nailed-on starter plays over a season (70% of 38 full matches).
const SEASON_MINUTES: f64 = 38.0 * 90.0 * 0.7;

const WEIGHT_FORM: f64 = 0.4;
const WEIGHT_FIXTURE: f64 = 0.3;
const WEIGHT_STRENGTH: f64 = 0.3;
const BLEND_SCALE: f64 = 0.8;
const MIN_MINUTES_FACTOR: f64 = 0.5;
const UNAVAILABLE_FACTOR: f64 = 0.3;
const ROTATION_THRESHOLD: f64 = 0.7;
const HIGH_OWNERSHIP_PCT: f64 = 25.0;

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

fn form_benchmark(position: Position) -> f64 {
    match position {
        Position::Gk => 2.5,
        Position::Def => 3.0,
        Position::Mid => 3.5,
        Position::Fwd => 4.0,
    }
}

fn position_baseline(position: Position) -> f64 {
    match position {
        Position::Gk => 2.0,
        Position::Def => 2.5,
        Position::Mid => 3.0,
        Position::Fwd => 3.5,
    }
}

fn position_multiplier(position: Position) -> f64 {
    match position {
        Position::Gk => 0.8,
        Position::Def => 0.9,
        Position::Mid => 1.1,
        Position::Fwd => 1.2,
    }
}

/// Season form on 0–10: points per 90 minutes relative to the position benchmark.
pub fn form_score(total_points: f64, minutes: u32, position: Position) -> f64 {
    if minutes == 0 {
        return 0.0;
    }
    let games = f64::from(minutes) / 90.0;
    let per_game = total_points / games.max(1.0);
    round_to((per_game / form_benchmark(position) * 8.0).min(10.0), 2)
}

/// Fixture favorability on 1–10 from an average FPL difficulty (1 easy, 5 hard).
pub fn fixture_favorability(avg_difficulty: Option<f64>) -> f64 {
    match avg_difficulty {
        None => NEUTRAL_SCORE,
        Some(d) => round_to(((6.0 - d) * 2.0).clamp(1.0, 10.0), 2),
    }
}

/// Results record for one team over the form window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamForm {
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub clean_sheets: u32,
}

/// Team strength on 0–10. Teams with no games score neutral.
pub fn team_strength(form: Option<&TeamForm>) -> f64 {
    let Some(form) = form.filter(|f| f.games_played > 0) else {
        return NEUTRAL_SCORE;
    };
    let games = f64::from(form.games_played);
    let attack = (f64::from(form.goals_for) / games * 2.5).min(10.0);
    let defence = (f64::from(form.clean_sheets) / games * 10.0).min(10.0);
    let general = f64::from(form.wins) / games * 10.0;
    let penalty = (f64::from(form.goals_against) / games * 2.0).min(5.0);
    round_to(((attack + defence + general - penalty) / 3.0).clamp(0.0, 10.0), 2)
}

/// A finished fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureResult {
    pub home: TeamId,
    pub away: TeamId,
    pub home_score: u32,
    pub away_score: u32,
}

/// An unplayed fixture with each side's FPL difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingFixture {
    pub home: TeamId,
    pub away: TeamId,
    pub home_difficulty: u8,
    pub away_difficulty: u8,
}

/// Team-level inputs shared by every player prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub team_form: BTreeMap<TeamId, TeamForm>,
    /// Average difficulty of each team's next few fixtures, 2 dp.
    pub avg_difficulty: BTreeMap<TeamId, f64>,
}

impl MatchContext {
    /// Build the context from results (oldest first) and upcoming fixtures (soonest first).
    ///
    /// Only the last [`FORM_WINDOW`] results and the first [`UPCOMING_WINDOW`]
    /// upcoming fixtures are used.
    pub fn from_fixtures(results: &[FixtureResult], upcoming: &[UpcomingFixture]) -> Self {
        let recent = &results[results.len().saturating_sub(FORM_WINDOW)..];
        let mut team_form: BTreeMap<TeamId, TeamForm> = BTreeMap::new();
        for r in recent {
            let home = team_form.entry(r.home).or_default();
            record_result(home, r.home_score, r.away_score);
            let away = team_form.entry(r.away).or_default();
            record_result(away, r.away_score, r.home_score);
        }

        let mut next: BTreeMap<TeamId, Vec<u8>> = BTreeMap::new();
        for f in upcoming.iter().take(UPCOMING_WINDOW) {
            for (team, difficulty) in [(f.home, f.home_difficulty), (f.away, f.away_difficulty)] {
                let list = next.entry(team).or_default();
                if list.len() < DIFFICULTY_HORIZON {
                    list.push(difficulty);
                }
            }
        }
        let avg_difficulty = next
            .into_iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(team, list)| {
                let sum: f64 = list.iter().map(|&d| f64::from(d)).sum();
                (team, round_to(sum / list.len() as f64, 2))
            })
            .collect();

        Self { team_form, avg_difficulty }
    }
}

fn record_result(form: &mut TeamForm, scored: u32, conceded: u32) {
    form.games_played += 1;
    form.goals_for += scored;
    form.goals_against += conceded;
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => form.wins += 1,
        std::cmp::Ordering::Less => form.losses += 1,
        std::cmp::Ordering::Equal => form.draws += 1,
    }
    if conceded == 0 {
        form.clean_sheets += 1;
    }
}

/// Season statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub team: TeamId,
    pub position: Position,
    pub total_points: f64,
    pub minutes: u32,
    pub ownership_pct: f64,
    pub availability: Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Rotation,
    HighOwnership,
    Availability,
}

impl RiskFactor {
    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::Rotation => "rotation risk",
            RiskFactor::HighOwnership => "high ownership",
            RiskFactor::Availability => "injury/suspension concern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Expected points for the next gameweek, 2 dp.
    pub predicted_points: f64,
    /// 0–10, 1 dp.
    pub confidence: f64,
    pub form_score: f64,
    pub fixture_favorability: f64,
    pub team_strength: f64,
    pub minutes_likelihood: f64,
    pub risk_factors: Vec<RiskFactor>,
}

/// Predict next-gameweek points for one player.
pub fn predict_points(stats: &PlayerStats, ctx: &MatchContext) -> Prediction {
    let form = form_score(stats.total_points, stats.minutes, stats.position);
    let fixture = fixture_favorability(ctx.avg_difficulty.get(&stats.team).copied());
    let strength = team_strength(ctx.team_form.get(&stats.team));
    let likelihood = (f64::from(stats.minutes) / SEASON_MINUTES).min(1.0);

    let blend = (form * WEIGHT_FORM + fixture * WEIGHT_FIXTURE + strength * WEIGHT_STRENGTH) * BLEND_SCALE;
    let mut points = (blend + position_baseline(stats.position)) * position_multiplier(stats.position);
    points *= likelihood.max(MIN_MINUTES_FACTOR);
    let available = stats.availability.is_available();
    if !available {
        points *= UNAVAILABLE_FACTOR;
    }

    let mut risk_factors = Vec::new();
    if likelihood < ROTATION_THRESHOLD {
        risk_factors.push(RiskFactor::Rotation);
    }
    if stats.ownership_pct > HIGH_OWNERSHIP_PCT {
        risk_factors.push(RiskFactor::HighOwnership);
    }
    if !available {
        risk_factors.push(RiskFactor::Availability);
    }

    Prediction {
        predicted_points: round_to(points, 2),
        confidence: round_to((form + likelihood * 5.0).min(10.0), 1),
        form_score: form,
        fixture_favorability: fixture,
        team_strength: strength,
        minutes_likelihood: likelihood,
        risk_factors,
    }
}
