//! Artifact bundle tests: save, reload and inspect every exported format.

use chrono::{NaiveDate, NaiveDateTime};
use fplsquad_runner::{
    export_json, export_squad_csv, generate_report, import_json, load_artifacts, load_pool,
    run_selection_at, save_artifacts, OptimizerConfig, PoolConfig, PoolFormat, SelectionReport,
};

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 16).unwrap().and_hms_opt(18, 30, 0).unwrap()
}

fn make_report(seed: u64) -> SelectionReport {
    let config = OptimizerConfig {
        pool: PoolConfig { format: PoolFormat::Synthetic, seed, ..PoolConfig::default() },
        ..OptimizerConfig::default()
    };
    let pool = load_pool(&config.pool).unwrap();
    run_selection_at(&config, &pool, fixed_time()).unwrap()
}

#[test]
fn artifacts_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let report = make_report(11);

    let run_dir = save_artifacts(&report, dir.path()).unwrap();

    let name = run_dir.file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(name, format!("{}_20240816_183000", report.run_id_short()));
    for file in ["report.json", "squad.csv", "report.txt"] {
        assert!(run_dir.join(file).exists(), "missing {file}");
    }

    let loaded = load_artifacts(&run_dir).unwrap();
    assert_eq!(loaded.run_id, report.run_id);
    assert_eq!(loaded.squad, report.squad);
    assert_eq!(loaded.summary, report.summary);
    assert_eq!(loaded.generated_at, fixed_time());
}

#[test]
fn squad_csv_lists_fifteen_players_with_roles() {
    let report = make_report(11);
    let csv = export_squad_csv(&report.squad).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines[0].starts_with("id,name,team,position,price"));
    assert!(lines[0].ends_with(",role"));
    assert_eq!(lines.iter().filter(|l| l.ends_with(",captain")).count(), 1);
    assert_eq!(lines.iter().filter(|l| l.ends_with(",vice_captain")).count(), 1);
    assert!(lines[12].ends_with(",bench_1"));
    assert!(lines[15].ends_with(",bench_4"));
}

#[test]
fn text_report_names_formation_and_captain() {
    let report = make_report(11);
    let text = generate_report(&report);

    assert!(text.contains(&format!("Formation: {}", report.summary.formation)));
    assert!(text.contains(&format!("{} (C)", report.summary.captain)));
    assert!(text.contains("(VC)"));
    assert!(text.contains("Starting XI"));
    assert!(text.contains("Bench"));
    assert!(text.contains("Composition: GK 2, DEF 5, MID 5, FWD 3"));
}

#[test]
fn newer_schema_is_rejected() {
    let report = make_report(11);
    let json = export_json(&report).unwrap();
    let bumped = json.replacen("\"schema_version\": 1", "\"schema_version\": 99", 1);
    assert_ne!(json, bumped);

    let err = import_json(&bumped).unwrap_err();
    assert!(err.to_string().contains("unsupported schema version 99"));
}

#[test]
fn missing_schema_version_defaults_to_current() {
    let report = make_report(11);
    let mut value: serde_json::Value = serde_json::from_str(&export_json(&report).unwrap()).unwrap();
    value.as_object_mut().unwrap().remove("schema_version");

    let loaded = import_json(&value.to_string()).unwrap();
    assert_eq!(loaded.schema_version, fplsquad_runner::SCHEMA_VERSION);
}
