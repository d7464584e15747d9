//! BDD tests for the runner: config → pool → report.
//!
//! These tests verify the runner end to end:
//! - Loading CSV and FPL bootstrap pools from disk
//! - Config files driving constraints
//! - Risk-adjusted fallback surfacing in the report
//! - Typed failures for bad rows and impossible budgets

use std::path::PathBuf;

use fplsquad_core::{Position, Price, SelectionError};
use fplsquad_runner::{
    load_pool, run_from_config, LoadError, OptimizerConfig, PoolConfig, PoolFormat, RunError,
};

/// Write a CSV pool with enough players at every position, spread over 10 clubs.
fn write_csv_pool(dir: &std::path::Path, injured_keepers: bool) -> PathBuf {
    let mut csv = String::from("id,name,team,position,price,predicted_points,ownership_pct,availability\n");
    let mut id = 1;
    for (position, count, base_price) in [("GK", 3, 4.0), ("DEF", 8, 4.0), ("MID", 8, 5.0), ("FWD", 5, 5.5)] {
        for k in 0..count {
            let availability = if injured_keepers && position == "GK" && k > 0 { "injured" } else { "fit" };
            csv.push_str(&format!(
                "{id},Player {id},{team},{position},{price:.1},{points:.1},{own:.1},{availability}\n",
                team = id % 10 + 1,
                price = base_price + f64::from(k) * 0.5,
                points = 3.0 + f64::from(k) * 0.7,
                own = f64::from(k) * 4.0,
            ));
            id += 1;
        }
    }
    let path = dir.join("players.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn csv_config(path: PathBuf) -> OptimizerConfig {
    OptimizerConfig {
        pool: PoolConfig { path: Some(path), format: PoolFormat::Csv, ..PoolConfig::default() },
        ..OptimizerConfig::default()
    }
}

#[test]
fn bdd_scenario_select_from_csv_pool() {
    // GIVEN a CSV pool on disk and default constraints
    let dir = tempfile::tempdir().unwrap();
    let config = csv_config(write_csv_pool(dir.path(), false));

    // WHEN the runner executes
    let report = run_from_config(&config).expect("selection should succeed");

    // THEN the report holds a complete, valid squad
    assert_eq!(report.squad.players.len(), 15);
    assert_eq!(report.pool_size, 24);
    assert!(report.squad.total_spend <= Price(1000));
    assert_eq!(report.summary.composition[&Position::Fwd], 3);
    assert!(!report.summary.risk_adjusted);
}

#[test]
fn bdd_scenario_config_file_drives_constraints() {
    // GIVEN a TOML config naming the pool and a tighter team cap
    let dir = tempfile::tempdir().unwrap();
    let pool_path = write_csv_pool(dir.path(), false);
    let toml = format!(
        "[constraints]\nbudget = 90.0\nmax_per_team = 2\n\n[pool]\npath = {:?}\nformat = \"csv\"\n",
        pool_path.display().to_string()
    );
    let config_path = dir.path().join("fplsquad.toml");
    std::fs::write(&config_path, toml).unwrap();

    // WHEN the config is loaded and run
    let config = OptimizerConfig::from_file(&config_path).unwrap();
    let report = run_from_config(&config).unwrap();

    // THEN both limits hold
    assert_eq!(report.constraints.budget, Price(900));
    assert!(report.squad.total_spend <= Price(900));
    assert!(report.squad.team_counts().values().all(|&n| n <= 2));
}

#[test]
fn bdd_scenario_injured_keepers_trigger_risk_adjusted_squad() {
    // GIVEN only one fit goalkeeper
    let dir = tempfile::tempdir().unwrap();
    let config = csv_config(write_csv_pool(dir.path(), true));

    // WHEN selecting
    let report = run_from_config(&config).unwrap();

    // THEN the squad is flagged and contains an unavailable keeper
    assert!(report.summary.risk_adjusted);
    assert!(report.squad.players_at(Position::Gk).any(|c| !c.is_available()));
}

#[test]
fn bdd_scenario_excluding_unavailable_players_fails_loudly() {
    // GIVEN the same pool but unavailable players filtered at load
    let dir = tempfile::tempdir().unwrap();
    let mut config = csv_config(write_csv_pool(dir.path(), true));
    config.pool.include_unavailable = false;

    // WHEN selecting
    let err = run_from_config(&config).unwrap_err();

    // THEN the keeper shortage is reported, not papered over
    assert!(matches!(
        err,
        RunError::Selection(SelectionError::InsufficientCandidates { position: Position::Gk })
    ));
}

#[test]
fn bdd_scenario_bad_row_names_row_and_field() {
    // GIVEN a CSV whose second row has a negative price
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "id,name,team,position,price,predicted_points\n1,A,1,GK,5.0,3.0\n2,B,2,DEF,-4.0,3.0\n",
    )
    .unwrap();

    // WHEN loading
    let err = load_pool(&csv_config(path).pool).unwrap_err();

    // THEN the error points at row 2, field price
    assert_eq!(err.row(), Some(2));
    assert!(err.to_string().contains("price"));
}

#[test]
fn bdd_scenario_missing_file_is_io_error() {
    let config = csv_config(PathBuf::from("/definitely/not/here.csv"));
    let err = run_from_config(&config).unwrap_err();
    assert!(matches!(err, RunError::Load(LoadError::Io { .. })));
}

#[test]
fn bdd_scenario_fpl_bootstrap_pool() {
    // GIVEN a bootstrap file with thirty players over eight clubs
    let dir = tempfile::tempdir().unwrap();
    let mut elements = Vec::new();
    let mut id = 1;
    for (element_type, count) in [(1, 4), (2, 10), (3, 10), (4, 6)] {
        for k in 0..count {
            elements.push(format!(
                r#"{{"id": {id}, "web_name": "P{id}", "team": {team}, "element_type": {element_type},
                    "now_cost": {cost}, "total_points": {pts}, "minutes": {mins},
                    "selected_by_percent": "{own}", "status": "a"}}"#,
                team = id % 8 + 1,
                cost = 45 + k * 3,
                pts = 20 + k * 6,
                mins = 900 + k * 150,
                own = k * 2,
            ));
            id += 1;
        }
    }
    let json = format!(
        r#"{{"elements": [{}], "teams": [{{"id": 1, "name": "Arsenal", "short_name": "ARS"}}], "fixtures": []}}"#,
        elements.join(",")
    );
    let path = dir.path().join("bootstrap.json");
    std::fs::write(&path, json).unwrap();

    let config = OptimizerConfig {
        pool: PoolConfig { path: Some(path), format: PoolFormat::FplBootstrap, ..PoolConfig::default() },
        ..OptimizerConfig::default()
    };

    // WHEN selecting
    let report = run_from_config(&config).unwrap();

    // THEN club names come through and the squad is complete
    assert_eq!(report.squad.players.len(), 15);
    assert_eq!(report.team_name(fplsquad_core::TeamId(1)), "Arsenal");
    assert!(report.squad.players.iter().all(|c| c.predicted_points > 0.0));
}
