//! fplsquad runner: everything around the optimizer that touches files.
//!
//! This crate builds on `fplsquad-core` to provide:
//! - TOML configuration with validated conversion to constraints
//! - Pool loading from CSV, JSON, FPL bootstrap files, or synthetic seeds
//! - Single-run orchestration producing a fingerprinted `SelectionReport`
//! - Budget sweeps and pool batches with rayon
//! - JSON, CSV and text export with artifact bundles

pub mod config;
pub mod export;
pub mod fpl_data;
pub mod pool_loader;
pub mod runner;
pub mod sweep;

pub use config::{ConfigError, OptimizerConfig, PoolConfig, PoolFormat};
pub use export::{export_json, export_squad_csv, generate_report, import_json, load_artifacts, save_artifacts};
pub use fpl_data::{Bootstrap, FplDataError};
pub use pool_loader::{load_pool, LoadError, LoadedPool, PoolSource};
pub use runner::{run_from_config, run_selection, run_selection_at, RunError, SelectionReport, SquadSummary, SCHEMA_VERSION};
pub use sweep::{BatchOutcome, BudgetSweep, PoolBatch, SweepPoint, SweepResults};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn report_is_send_sync() {
        assert_send::<SelectionReport>();
        assert_sync::<SelectionReport>();
    }

    #[test]
    fn loaded_pool_is_send_sync() {
        assert_send::<LoadedPool>();
        assert_sync::<LoadedPool>();
    }

    #[test]
    fn batch_types_are_send_sync() {
        assert_send::<BudgetSweep>();
        assert_sync::<BudgetSweep>();
        assert_send::<SweepResults>();
        assert_sync::<SweepResults>();
        assert_send::<BatchOutcome>();
        assert_sync::<BatchOutcome>();
    }

    #[test]
    fn config_is_send_sync() {
        assert_send::<OptimizerConfig>();
        assert_sync::<OptimizerConfig>();
    }
}
