//! Candidate pool loading for the runner.
//!
//! Resolves a [`PoolConfig`] into validated candidates:
//! 1. CSV or JSON files of `CandidateRecord` rows
//! 2. A saved FPL bootstrap file, scored by the rule-based model
//! 3. A seeded synthetic pool (tagged, for demos and testing)
//!
//! Every row is validated at this boundary. The first bad row fails the
//! whole load with its row number and the offending field; nothing is
//! silently dropped or defaulted.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use fplsquad_core::domain::PoolHash;
use fplsquad_core::fingerprint::pool_hash;
use fplsquad_core::synthetic::{synthetic_pool, SyntheticSpec};
use fplsquad_core::{Candidate, CandidateRecord, SelectionError, TeamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{PoolConfig, PoolFormat};
use crate::fpl_data::{Bootstrap, FplDataError};

/// Errors from the pool loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read pool {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("parse pool JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: SelectionError,
    },
    #[error(transparent)]
    Fpl(#[from] FplDataError),
    #[error("pool format '{0}' needs a file path (use --pool or [pool] path)")]
    MissingPath(PoolFormat),
}

impl LoadError {
    /// Row number (1-based, header excluded) of the offending record, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            LoadError::Csv { row, .. } | LoadError::InvalidRow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// Where a loaded pool came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolSource {
    Csv { path: PathBuf },
    Json { path: PathBuf },
    FplBootstrap { path: PathBuf },
    Synthetic { seed: u64 },
}

impl PoolSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, PoolSource::Synthetic { .. })
    }
}

impl fmt::Display for PoolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolSource::Csv { path } => write!(f, "csv:{}", path.display()),
            PoolSource::Json { path } => write!(f, "json:{}", path.display()),
            PoolSource::FplBootstrap { path } => write!(f, "fpl:{}", path.display()),
            PoolSource::Synthetic { seed } => write!(f, "synthetic:{seed}"),
        }
    }
}

/// A validated pool with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedPool {
    pub candidates: Vec<Candidate>,
    pub source: PoolSource,
    /// BLAKE3 over the canonical, id-sorted pool.
    pub pool_hash: PoolHash,
    /// Unavailable players dropped because `include_unavailable` was off.
    pub rejected: usize,
    /// Club names when the source provides them.
    pub team_names: BTreeMap<TeamId, String>,
}

impl LoadedPool {
    fn new(candidates: Vec<Candidate>, source: PoolSource, team_names: BTreeMap<TeamId, String>) -> Self {
        let pool_hash = pool_hash(&candidates);
        Self { candidates, source, pool_hash, rejected: 0, team_names }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Drop injured and suspended players, recording how many went.
    fn without_unavailable(mut self) -> Self {
        let before = self.candidates.len();
        self.candidates.retain(|c| c.is_available());
        self.rejected = before - self.candidates.len();
        self.pool_hash = pool_hash(&self.candidates);
        self
    }
}

/// Load the pool described by `config`.
pub fn load_pool(config: &PoolConfig) -> Result<LoadedPool, LoadError> {
    let path = || config.path.clone().ok_or(LoadError::MissingPath(config.format));
    let pool = match config.format {
        PoolFormat::Csv => {
            let path = path()?;
            let candidates = parse_csv(open(&path)?)?;
            LoadedPool::new(candidates, PoolSource::Csv { path }, BTreeMap::new())
        }
        PoolFormat::Json => {
            let path = path()?;
            let candidates = parse_json(&read_to_string(&path)?)?;
            LoadedPool::new(candidates, PoolSource::Json { path }, BTreeMap::new())
        }
        PoolFormat::FplBootstrap => {
            let path = path()?;
            let bootstrap = Bootstrap::from_json(&read_to_string(&path)?)?;
            let candidates = bootstrap.to_candidates()?;
            check_unique(&candidates)?;
            LoadedPool::new(candidates, PoolSource::FplBootstrap { path }, bootstrap.team_names())
        }
        PoolFormat::Synthetic => {
            let candidates = synthetic_pool(&SyntheticSpec::with_seed(config.seed));
            LoadedPool::new(candidates, PoolSource::Synthetic { seed: config.seed }, BTreeMap::new())
        }
    };

    let pool = if config.include_unavailable { pool } else { pool.without_unavailable() };
    info!(
        source = %pool.source,
        candidates = pool.len(),
        rejected = pool.rejected,
        pool_hash = %pool.pool_hash,
        "pool loaded"
    );
    Ok(pool)
}

/// Parse CSV with header `id,name,team,position,price,predicted_points,ownership_pct,availability`.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Candidate>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut candidates = Vec::new();
    for (i, result) in rdr.deserialize::<CandidateRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| LoadError::Csv { row, source })?;
        candidates.push(to_candidate(row, record)?);
    }
    check_unique(&candidates)?;
    debug!(rows = candidates.len(), "parsed CSV pool");
    Ok(candidates)
}

/// Parse a JSON array of candidate records.
pub fn parse_json(content: &str) -> Result<Vec<Candidate>, LoadError> {
    let records: Vec<CandidateRecord> = serde_json::from_str(content)?;
    let candidates = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| to_candidate(i + 1, record))
        .collect::<Result<Vec<_>, _>>()?;
    check_unique(&candidates)?;
    Ok(candidates)
}

fn to_candidate(row: usize, record: CandidateRecord) -> Result<Candidate, LoadError> {
    Candidate::try_from(record).map_err(|source| LoadError::InvalidRow { row, source })
}

fn check_unique(candidates: &[Candidate]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        if !seen.insert(c.id) {
            return Err(LoadError::InvalidRow {
                row: i + 1,
                source: SelectionError::InvalidCandidate {
                    id: Some(c.id.0),
                    field: "id",
                    reason: "duplicate".into(),
                },
            });
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fplsquad_core::{Availability, Position, Price};

    const CSV: &str = "\
id,name,team,position,price,predicted_points,ownership_pct,availability
1,Raya,1,GK,5.5,4.1,20.0,fit
2,Saliba,1,DEF,6.0,5.2,35.5,
3,Saka,1,MID,10.0,7.3,40.1,a
4,Haaland,11,FWD,14.5,9.0,60.0,d
";

    #[test]
    fn csv_rows_become_candidates() {
        let candidates = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].position, Position::Gk);
        assert_eq!(candidates[2].price, Price(100));
        assert_eq!(candidates[1].availability, Availability::Fit);
        assert_eq!(candidates[3].availability, Availability::Injured);
        assert_eq!(candidates[3].team, TeamId(11));
    }

    #[test]
    fn numeric_positions_accepted() {
        let csv = "id,name,team,position,price,predicted_points\n7,Pope,4,1,5.0,3.9\n";
        let candidates = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(candidates[0].position, Position::Gk);
        assert_eq!(candidates[0].ownership_pct, 0.0);
    }

    #[test]
    fn missing_price_names_row_and_field() {
        let csv = "id,name,team,position,price,predicted_points\n1,A,1,GK,5.0,3.0\n2,B,1,DEF,,3.0\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(err.row(), Some(2));
        assert!(matches!(
            err,
            LoadError::InvalidRow { source: SelectionError::InvalidCandidate { field: "price", .. }, .. }
        ));
    }

    #[test]
    fn unparseable_number_is_a_csv_error() {
        let csv = "id,name,team,position,price,predicted_points\n1,A,1,GK,cheap,3.0\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { row: 1, .. }));
    }

    #[test]
    fn duplicate_id_rejected_at_its_row() {
        let csv = "id,name,team,position,price,predicted_points\n1,A,1,GK,5.0,3.0\n1,B,2,GK,5.0,3.0\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(err.row(), Some(2));
    }

    #[test]
    fn json_array_parses() {
        let json = r#"[
            {"id": 1, "name": "Raya", "team": 1, "position": "GKP", "price": 5.5, "predicted_points": 4.1},
            {"id": 2, "name": "Saliba", "team": 1, "position": "DEF", "price": 6.0,
             "predicted_points": 5.2, "ownership_pct": 35.5, "availability": "suspended"}
        ]"#;
        let candidates = parse_json(json).unwrap();
        assert_eq!(candidates[0].position, Position::Gk);
        assert_eq!(candidates[1].availability, Availability::Suspended);
    }

    #[test]
    fn json_bad_ownership_rejected() {
        let json = r#"[{"id": 1, "name": "X", "team": 1, "position": "MID", "price": 5.0,
                        "predicted_points": 3.0, "ownership_pct": 140.0}]"#;
        let err = parse_json(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidRow { row: 1, source: SelectionError::InvalidCandidate { field: "ownership_pct", .. } }
        ));
    }

    #[test]
    fn synthetic_pool_is_tagged_and_hashed() {
        let config = PoolConfig { format: PoolFormat::Synthetic, seed: 9, ..PoolConfig::default() };
        let a = load_pool(&config).unwrap();
        let b = load_pool(&config).unwrap();
        assert!(a.source.is_synthetic());
        assert_eq!(a.pool_hash, b.pool_hash);
        assert!(!a.is_empty());
    }

    #[test]
    fn unavailable_players_can_be_excluded() {
        let config = PoolConfig {
            format: PoolFormat::Synthetic,
            seed: 9,
            include_unavailable: false,
            ..PoolConfig::default()
        };
        let pool = load_pool(&config).unwrap();
        assert!(pool.candidates.iter().all(|c| c.is_available()));
        let full = load_pool(&PoolConfig { include_unavailable: true, ..config }).unwrap();
        assert_eq!(pool.len() + pool.rejected, full.len());
    }

    #[test]
    fn file_formats_need_a_path() {
        let err = load_pool(&PoolConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingPath(PoolFormat::Csv)));
    }
}
