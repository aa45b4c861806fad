use crate::domain::budget::DEFAULT_PERCENTAGE;
use crate::domain::graph::Cost;
use crate::domain::steiner::DEFAULT_SEED;
use serde::Serialize;
use std::path::PathBuf;

/// Settings for one budget calculation.
///
/// Where the result goes is decided by the engine's sink, not here.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetConfig {
    /// Share added on top of the Steiner tree cost, e.g. 0.1 for 10%.
    pub percentage: f64,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_PERCENTAGE,
            seed: DEFAULT_SEED,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    /// Cost of the approximate Steiner tree over the reserves.
    pub lower_bound: Cost,
    pub budget: Cost,
    pub percentage: f64,
    pub seed: u64,
    /// Reserve node ids, ascending.
    pub terminals: Vec<usize>,
    /// Node ids of the Steiner tree, ascending.
    pub tree_nodes: Vec<usize>,
    pub rounds: usize,
    /// File the budget was written to.
    pub output: PathBuf,
}
