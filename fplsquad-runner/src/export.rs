//! Reporting and export: JSON, CSV, and plain-text artifact generation.
//!
//! Provides three export formats for selection reports:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the 15 selected players with their role in the squad
//! - **Text**: the human-readable squad sheet printed by the CLI
//!
//! All persisted artifacts include a `schema_version` field. Newer versions
//! are rejected on load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fplsquad_core::{Candidate, Position, Squad};

use crate::runner::{SelectionReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SelectionReport` to pretty JSON.
pub fn export_json(report: &SelectionReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SelectionReport to JSON")
}

/// Deserialize a `SelectionReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SelectionReport> {
    let report: SelectionReport =
        serde_json::from_str(json).context("failed to deserialize SelectionReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Role of a player within the squad, as written to CSV.
fn role(squad: &Squad, c: &Candidate) -> String {
    if c.id == squad.captain {
        "captain".into()
    } else if c.id == squad.vice_captain {
        "vice_captain".into()
    } else if squad.is_starter(c.id) {
        "starter".into()
    } else {
        let slot = squad.bench.iter().position(|b| b.id == c.id).map_or(0, |i| i + 1);
        format!("bench_{slot}")
    }
}

/// Export the squad as CSV.
///
/// Columns: id, name, team, position, price, predicted_points,
/// ownership_pct, availability, role. Starters come first (XI order), then
/// the bench in substitution order.
pub fn export_squad_csv(squad: &Squad) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "id",
        "name",
        "team",
        "position",
        "price",
        "predicted_points",
        "ownership_pct",
        "availability",
        "role",
    ])?;

    for c in squad.starting_xi.iter().chain(&squad.bench) {
        wtr.write_record([
            &c.id.to_string(),
            &c.name,
            &c.team.to_string(),
            c.position.label(),
            &c.price.to_string(),
            &format!("{:.2}", c.predicted_points),
            &format!("{:.1}", c.ownership_pct),
            &c.availability.to_string(),
            &role(squad, c),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Text report ────────────────────────────────────────────────────

fn player_line(out: &mut String, squad: &Squad, c: &Candidate, team: &str) {
    let marker = if c.id == squad.captain {
        " (C)"
    } else if c.id == squad.vice_captain {
        " (VC)"
    } else {
        ""
    };
    let flag = if c.is_available() { String::new() } else { format!(" [{}]", c.availability) };
    let _ = writeln!(
        out,
        "  {:<22} {:<16} {:>5}  {:>5.2} pts{}",
        format!("{}{}", c.name, marker),
        team,
        c.price.to_string(),
        c.predicted_points,
        flag
    );
}

/// Render the squad sheet.
pub fn generate_report(report: &SelectionReport) -> String {
    let squad = &report.squad;
    let s = &report.summary;
    let mut out = String::with_capacity(2048);

    let _ = writeln!(out, "FPL squad  run {}  pool {}", report.run_id_short(), report.pool_source);
    let _ = writeln!(
        out,
        "Budget: {} | Spent: {} | Remaining: {}",
        squad.budget, s.total_spend, s.remaining_budget
    );
    let _ = writeln!(out, "Formation: {}", s.formation);
    let _ = writeln!(
        out,
        "Predicted points: XI {:.2} | with captain {:.2} | squad {:.2}",
        s.starting_points, s.projected_points, s.squad_points
    );
    if s.risk_adjusted {
        out.push_str("WARNING: squad includes injured or suspended players (not enough fit candidates)\n");
    }
    out.push('\n');

    out.push_str("Starting XI\n");
    for &position in &Position::ALL {
        let starters: Vec<&Candidate> = squad.starters_at(position).collect();
        if starters.is_empty() {
            continue;
        }
        let _ = writeln!(out, " {}", position.label());
        for c in starters {
            player_line(&mut out, squad, c, &report.team_name(c.team));
        }
    }
    out.push('\n');

    out.push_str("Bench\n");
    for (i, c) in squad.bench.iter().enumerate() {
        let _ = write!(out, " {}.", i + 1);
        player_line(&mut out, squad, c, &report.team_name(c.team));
    }
    out.push('\n');

    out.push_str("Team distribution\n");
    for (team, count) in &s.team_distribution {
        let _ = writeln!(out, "  {:<20} {}", report.team_name(*team), count);
    }
    out.push('\n');

    let composition: Vec<String> = Position::ALL
        .iter()
        .map(|p| format!("{} {}", p.label(), s.composition.get(p).copied().unwrap_or(0)))
        .collect();
    let _ = writeln!(out, "Composition: {}", composition.join(", "));

    out
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a selection run.
///
/// Creates a directory named `{run_id_prefix}_{timestamp}/` under `output_dir`
/// containing:
/// - `report.json`: the full `SelectionReport`
/// - `squad.csv`: the 15 players with roles
/// - `report.txt`: the squad sheet
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &SelectionReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.run_id_short(),
        report.generated_at.format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("report.json"), &json)?;

    let csv = export_squad_csv(&report.squad)?;
    std::fs::write(run_dir.join("squad.csv"), &csv)?;

    std::fs::write(run_dir.join("report.txt"), generate_report(report))?;

    Ok(run_dir)
}

/// Load a `SelectionReport` from an artifact directory's report.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<SelectionReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}
