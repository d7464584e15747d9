//! Batch selection: one pool over a budget grid, or many pools at one budget.
//!
//! Each selection is independent and pure, so batches fan out with rayon.
//! Results come back in input order and are identical to a serial run.

use fplsquad_core::domain::PoolHash;
use fplsquad_core::{select_squad, Candidate, ConstraintSet, Price, SelectionError, Squad};
use rayon::prelude::*;
use tracing::debug;

use crate::pool_loader::{LoadedPool, PoolSource};

/// Outcome of one budget in a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub budget: Price,
    pub result: Result<Squad, SelectionError>,
}

impl SweepPoint {
    pub fn points(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|s| s.squad_points())
    }
}

/// Runs the optimizer for every budget in a grid, optionally in parallel.
#[derive(Debug, Clone)]
pub struct BudgetSweep {
    budgets: Vec<Price>,
    parallel: bool,
}

impl BudgetSweep {
    pub fn new(budgets: Vec<Price>) -> Self {
        Self { budgets, parallel: true }
    }

    /// Evenly spaced budgets from `from` to `to` inclusive.
    pub fn range(from: Price, to: Price, step: Price) -> Self {
        let step = step.tenths().max(1) as usize;
        let budgets = (from.tenths()..=to.tenths()).step_by(step).map(Price::from_tenths).collect();
        Self::new(budgets)
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn budgets(&self) -> &[Price] {
        &self.budgets
    }

    /// Select a squad at every budget. `base` supplies everything but the budget.
    pub fn run(&self, candidates: &[Candidate], base: &ConstraintSet) -> SweepResults {
        let select = |&budget: &Price| SweepPoint {
            budget,
            result: select_squad(candidates, &base.clone().with_budget(budget)),
        };
        let points: Vec<SweepPoint> = if self.parallel {
            self.budgets.par_iter().map(select).collect()
        } else {
            self.budgets.iter().map(select).collect()
        };
        debug!(budgets = points.len(), parallel = self.parallel, "budget sweep complete");
        SweepResults { points }
    }
}

/// Results of a budget sweep, in grid order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResults {
    points: Vec<SweepPoint>,
}

impl SweepResults {
    pub fn all(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn feasible_count(&self) -> usize {
        self.points.iter().filter(|p| p.result.is_ok()).count()
    }

    /// Highest-scoring squad; ties go to the smaller budget.
    pub fn best(&self) -> Option<&SweepPoint> {
        self.points
            .iter()
            .filter(|p| p.result.is_ok())
            .min_by(|a, b| {
                let (pa, pb) = (a.points().unwrap_or(f64::MIN), b.points().unwrap_or(f64::MIN));
                pb.total_cmp(&pa).then(a.budget.cmp(&b.budget))
            })
    }
}

/// Outcome for one pool in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub source: PoolSource,
    pub pool_hash: PoolHash,
    pub result: Result<Squad, SelectionError>,
}

/// Runs the optimizer over many pools under the same constraints.
#[derive(Debug, Clone)]
pub struct PoolBatch {
    parallel: bool,
}

impl Default for PoolBatch {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl PoolBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run(&self, pools: &[LoadedPool], constraints: &ConstraintSet) -> Vec<BatchOutcome> {
        let select = |pool: &LoadedPool| BatchOutcome {
            source: pool.source.clone(),
            pool_hash: pool.pool_hash.clone(),
            result: select_squad(&pool.candidates, constraints),
        };
        if self.parallel {
            pools.par_iter().map(select).collect()
        } else {
            pools.iter().map(select).collect()
        }
    }
}
