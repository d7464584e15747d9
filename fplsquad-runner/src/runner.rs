//! Selection runner: wires configuration, pool loading and the optimizer.
//!
//! Two entry points:
//! - `run_from_config()`: loads the pool described by the config, then runs. Used by the CLI.
//! - `run_selection()`: takes an already loaded pool. Used by batches and tests.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Utc};
use fplsquad_core::domain::{ConstraintsHash, PoolHash, RunId};
use fplsquad_core::fingerprint::constraints_hash;
use fplsquad_core::{select_squad, ConstraintSet, Formation, Position, Price, SelectionError, Squad, TeamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, OptimizerConfig};
use crate::pool_loader::{load_pool, LoadError, LoadedPool, PoolSource};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("pool error: {0}")]
    Load(#[from] LoadError),
    #[error("selection failed: {0}")]
    Selection(#[from] SelectionError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Headline numbers of a selected squad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSummary {
    pub total_spend: Price,
    pub remaining_budget: Price,
    pub squad_points: f64,
    pub starting_points: f64,
    /// Starting XI points with the captain counted twice.
    pub projected_points: f64,
    pub formation: Formation,
    pub captain: String,
    pub vice_captain: String,
    pub team_distribution: BTreeMap<TeamId, usize>,
    pub composition: BTreeMap<Position, usize>,
    pub risk_adjusted: bool,
}

impl SquadSummary {
    pub fn from_squad(squad: &Squad) -> Self {
        let name = |c: Option<&fplsquad_core::Candidate>| c.map(|c| c.name.clone()).unwrap_or_default();
        Self {
            total_spend: squad.total_spend,
            remaining_budget: squad.remaining_budget(),
            squad_points: squad.squad_points(),
            starting_points: squad.starting_points(),
            projected_points: squad.projected_points(),
            formation: squad.formation,
            captain: name(squad.captain()),
            vice_captain: name(squad.vice_captain()),
            team_distribution: squad.team_counts(),
            composition: squad.position_counts(),
            risk_adjusted: squad.risk_adjusted,
        }
    }
}

/// Complete, persistable result of one selection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Hash of pool and constraints; identical inputs share it.
    pub run_id: String,
    pub pool_hash: PoolHash,
    pub constraints_hash: ConstraintsHash,
    pub generated_at: NaiveDateTime,
    pub pool_source: PoolSource,
    pub pool_size: usize,
    pub constraints: ConstraintSet,
    pub squad: Squad,
    pub summary: SquadSummary,
    #[serde(default)]
    pub team_names: BTreeMap<TeamId, String>,
}

impl SelectionReport {
    /// Club name if known, otherwise `Team {id}`.
    pub fn team_name(&self, team: TeamId) -> String {
        self.team_names.get(&team).cloned().unwrap_or_else(|| format!("Team {team}"))
    }

    pub fn run_id_short(&self) -> &str {
        &self.run_id[..self.run_id.len().min(12)]
    }
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Load the configured pool and run a selection on it.
pub fn run_from_config(config: &OptimizerConfig) -> Result<SelectionReport, RunError> {
    let pool = load_pool(&config.pool)?;
    run_selection(config, &pool)
}

/// Run a selection on a loaded pool, stamped with the current time.
pub fn run_selection(config: &OptimizerConfig, pool: &LoadedPool) -> Result<SelectionReport, RunError> {
    run_selection_at(config, pool, Utc::now().naive_utc())
}

/// Run a selection with an explicit timestamp (deterministic output for tests).
pub fn run_selection_at(
    config: &OptimizerConfig,
    pool: &LoadedPool,
    generated_at: NaiveDateTime,
) -> Result<SelectionReport, RunError> {
    let constraints = config.to_constraints()?;
    let squad = select_squad(&pool.candidates, &constraints)?;

    let constraints_hash = constraints_hash(&constraints);
    let run_id = RunId::new(pool.pool_hash.clone(), constraints_hash.clone());
    let summary = SquadSummary::from_squad(&squad);

    info!(
        run_id = %run_id.short(),
        spend = %summary.total_spend,
        points = summary.squad_points,
        formation = %summary.formation,
        risk_adjusted = summary.risk_adjusted,
        "squad selected"
    );

    Ok(SelectionReport {
        schema_version: SCHEMA_VERSION,
        run_id: run_id.hash(),
        pool_hash: pool.pool_hash.clone(),
        constraints_hash,
        generated_at,
        pool_source: pool.source.clone(),
        pool_size: pool.len(),
        constraints,
        squad,
        summary,
        team_names: pool.team_names.clone(),
    })
}
