//! fplsquad CLI: select, recommend, sweep and validate commands.
//!
//! Commands:
//! - `select`: pick a 15-player squad and print the squad sheet
//! - `recommend`: transfer shortlists from a pool
//! - `sweep`: rerun the selection over a grid of budgets
//! - `validate`: load a pool and report what is in it

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use fplsquad_core::recommend::{best_by_position, transfer_recommendations, DEFAULT_MIN_POINTS};
use fplsquad_core::{Candidate, Position, Price};
use fplsquad_runner::{
    export_json, generate_report, load_pool, run_selection, save_artifacts, BudgetSweep,
    LoadedPool, OptimizerConfig, PoolFormat,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fplsquad", version, about = "Fantasy Premier League squad optimizer")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the candidate pool comes from. Flags override the config file.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("pool_source").args(["pool", "bootstrap", "synthetic"])))]
struct PoolArgs {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candidate pool as CSV or JSON (by extension).
    #[arg(long)]
    pool: Option<PathBuf>,

    /// FPL bootstrap-static JSON file.
    #[arg(long)]
    bootstrap: Option<PathBuf>,

    /// Generate a synthetic pool from this seed.
    #[arg(long, value_name = "SEED")]
    synthetic: Option<u64>,

    /// Budget in millions, e.g. 100.0.
    #[arg(long)]
    budget: Option<f64>,

    /// Maximum players from one club.
    #[arg(long)]
    max_per_team: Option<usize>,
}

impl PoolArgs {
    fn to_config(&self) -> Result<OptimizerConfig> {
        let mut config = match &self.config {
            Some(path) => OptimizerConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => OptimizerConfig::default(),
        };

        if let Some(path) = &self.pool {
            config.pool.format = PoolFormat::from_path(path);
            config.pool.path = Some(path.clone());
        } else if let Some(path) = &self.bootstrap {
            config.pool.format = PoolFormat::FplBootstrap;
            config.pool.path = Some(path.clone());
        } else if let Some(seed) = self.synthetic {
            config.pool.format = PoolFormat::Synthetic;
            config.pool.seed = seed;
        }

        if let Some(budget) = self.budget {
            config = config.with_budget(budget);
        }
        if let Some(cap) = self.max_per_team {
            config = config.with_max_per_team(cap);
        }

        if config.pool.path.is_none() && config.pool.format != PoolFormat::Synthetic {
            bail!("no candidate pool: pass --pool, --bootstrap, --synthetic or a config with [pool] path");
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Select a squad and print the squad sheet.
    Select {
        #[command(flatten)]
        source: PoolArgs,

        /// Also write report.json, squad.csv and report.txt under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the full report as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print transfer shortlists: best value, highest predicted, differentials.
    Recommend {
        #[command(flatten)]
        source: PoolArgs,

        /// Most a recommended player may cost, in millions.
        #[arg(long, default_value_t = 15.0)]
        max_price: f64,

        /// Players per list.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Select a squad at each budget in a grid.
    Sweep {
        #[command(flatten)]
        source: PoolArgs,

        /// Comma-separated budgets in millions, e.g. 80,90,100.
        #[arg(long, value_delimiter = ',', required = true)]
        budgets: Vec<f64>,
    },
    /// Load a pool and summarise it, or report the first invalid row.
    Validate {
        #[command(flatten)]
        source: PoolArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Select { source, output_dir, json } => run_select(&source, output_dir, json),
        Commands::Recommend { source, max_price, top } => run_recommend(&source, max_price, top),
        Commands::Sweep { source, budgets } => run_sweep(&source, &budgets),
        Commands::Validate { source } => run_validate(&source),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load(config: &OptimizerConfig) -> Result<LoadedPool> {
    load_pool(&config.pool).context("loading candidate pool")
}

fn run_select(source: &PoolArgs, output_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let config = source.to_config()?;
    let pool = load(&config)?;
    let report = run_selection(&config, &pool).context("squad selection failed")?;

    if json {
        println!("{}", export_json(&report)?);
    } else {
        print!("{}", generate_report(&report));
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&report, &dir)?;
        eprintln!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_recommend(source: &PoolArgs, max_price: f64, top: usize) -> Result<()> {
    let config = source.to_config()?;
    let pool = load(&config)?;
    let Some(max_price) = Price::from_units(max_price) else {
        bail!("--max-price {max_price} is not a valid amount");
    };

    let recs = transfer_recommendations(&pool.candidates, max_price, top, DEFAULT_MIN_POINTS);
    if recs.is_empty() {
        println!("No players predicted above {DEFAULT_MIN_POINTS} points.");
        return Ok(());
    }

    print_list("Best value", &recs.best_value);
    print_list("Highest predicted", &recs.highest_predicted);
    print_list("Differentials (<5% owned)", &recs.differentials);

    println!("Best by position");
    for (position, players) in best_by_position(&pool.candidates, top) {
        let names: Vec<&str> = players.iter().map(|c| c.name.as_str()).collect();
        println!("  {:<4} {}", position.label(), names.join(", "));
    }
    Ok(())
}

fn print_list(title: &str, players: &[Candidate]) {
    println!("{title}");
    if players.is_empty() {
        println!("  (none)");
    }
    for c in players {
        println!(
            "  {:<22} {:<4} {:>5}  {:>5.2} pts  {:>5.1}% owned",
            c.name,
            c.position.label(),
            c.price.to_string(),
            c.predicted_points,
            c.ownership_pct
        );
    }
    println!();
}

fn run_sweep(source: &PoolArgs, budgets: &[f64]) -> Result<()> {
    let config = source.to_config()?;
    let base = config.to_constraints()?;
    let pool = load(&config)?;

    let grid = budgets
        .iter()
        .map(|&b| Price::from_units(b).with_context(|| format!("budget {b} is not a valid amount")))
        .collect::<Result<Vec<Price>>>()?;
    let results = BudgetSweep::new(grid).run(&pool.candidates, &base);
    debug!(feasible = results.feasible_count(), "sweep finished");

    println!("{:>8} {:>8} {:>8} {:>9}  Captain", "Budget", "Spent", "Points", "Formation");
    println!("{}", "-".repeat(56));
    for point in results.all() {
        match &point.result {
            Ok(squad) => {
                let captain = squad.captain().map(|c| c.name.as_str()).unwrap_or("-");
                println!(
                    "{:>8} {:>8} {:>8.2} {:>9}  {}{}",
                    point.budget.to_string(),
                    squad.total_spend.to_string(),
                    squad.squad_points(),
                    squad.formation.to_string(),
                    captain,
                    if squad.risk_adjusted { "  [risk-adjusted]" } else { "" }
                );
            }
            Err(e) => println!("{:>8}  infeasible: {e}", point.budget.to_string()),
        }
    }
    if let Some(best) = results.best() {
        println!();
        println!("Best: budget {} with {:.2} points", best.budget, best.points().unwrap_or_default());
    }
    Ok(())
}

fn run_validate(source: &PoolArgs) -> Result<()> {
    let config = source.to_config()?;
    config.to_constraints()?;
    let pool = load(&config)?;

    println!("Pool:        {}", pool.source);
    println!("Players:     {}", pool.len());
    println!("Pool hash:   {}", pool.pool_hash);
    if pool.rejected > 0 {
        println!("Dropped:     {} unavailable", pool.rejected);
    }
    let unavailable = pool.candidates.iter().filter(|c| !c.is_available()).count();
    println!("Unavailable: {unavailable}");
    for position in Position::ALL {
        let count = pool.candidates.iter().filter(|c| c.position == position).count();
        println!("  {:<4} {count}", position.label());
    }
    let teams: std::collections::BTreeSet<_> = pool.candidates.iter().map(|c| c.team).collect();
    println!("Clubs:       {}", teams.len());
    Ok(())
}
