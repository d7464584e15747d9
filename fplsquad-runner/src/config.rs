//! Serializable optimizer configuration.
//!
//! A TOML file with two tables:
//!
//! ```toml
//! [constraints]
//! budget = 100.0
//! max_per_team = 3
//! formations = ["3-4-3", "4-4-2"]
//!
//! [constraints.quotas]
//! gk = 2
//! def = 5
//! mid = 5
//! fwd = 3
//!
//! [pool]
//! path = "players.csv"
//! format = "csv"
//! ```
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use fplsquad_core::{ConstraintSet, Formation, PositionQuotas, Price, SelectionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or converting a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("budget {0} is not a valid amount")]
    InvalidBudget(f64),
    #[error(transparent)]
    Constraints(#[from] SelectionError),
}

/// Where the candidate pool comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolFormat {
    #[default]
    Csv,
    Json,
    FplBootstrap,
    Synthetic,
}

impl PoolFormat {
    /// Guess the format from a file extension; anything unrecognised is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PoolFormat::Json,
            _ => PoolFormat::Csv,
        }
    }
}

impl fmt::Display for PoolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PoolFormat::Csv => "csv",
            PoolFormat::Json => "json",
            PoolFormat::FplBootstrap => "fpl_bootstrap",
            PoolFormat::Synthetic => "synthetic",
        };
        f.write_str(s)
    }
}

/// Selection rules as written in the config file. Budget is in units (`100.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    pub budget: f64,
    pub max_per_team: usize,
    pub formations: Vec<Formation>,
    pub quotas: PositionQuotas,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        let defaults = ConstraintSet::default();
        Self {
            budget: defaults.budget.as_units(),
            max_per_team: defaults.max_per_team,
            formations: defaults.formations,
            quotas: defaults.quotas,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub path: Option<PathBuf>,
    pub format: PoolFormat,
    /// Seed for synthetic pools.
    pub seed: u64,
    /// Keep injured and suspended players in the pool. The optimizer still
    /// prefers fit players and only falls back to these when it must.
    pub include_unavailable: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { path: None, format: PoolFormat::Csv, seed: 42, include_unavailable: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub constraints: ConstraintsConfig,
    pub pool: PoolConfig,
}

impl OptimizerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.constraints.budget = budget;
        self
    }

    pub fn with_max_per_team(mut self, max_per_team: usize) -> Self {
        self.constraints.max_per_team = max_per_team;
        self
    }

    /// Convert to a validated core constraint set.
    pub fn to_constraints(&self) -> Result<ConstraintSet, ConfigError> {
        let c = &self.constraints;
        let budget = Price::from_units(c.budget).ok_or(ConfigError::InvalidBudget(c.budget))?;
        let set = ConstraintSet {
            budget,
            quotas: c.quotas,
            max_per_team: c.max_per_team,
            formations: c.formations.clone(),
        };
        set.validate()?;
        Ok(set)
    }
}
