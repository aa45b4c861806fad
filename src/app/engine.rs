use crate::adapters::cor::{CorBudgetWriter, CorFileSource};
use crate::app::dto::{BudgetConfig, BudgetReport};
use crate::domain::budget::BudgetLine;
use crate::domain::builder::graph_for_instance;
use crate::domain::ports::{BudgetSink, InstanceSource};
use crate::domain::steiner::{SteinerOptions, SteinerSolver};
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::info;

/// Computes the budget of an instance and hands it to a sink.
pub struct BudgetEngine {
    source: Box<dyn InstanceSource>,
    sink: Box<dyn BudgetSink>,
}

impl BudgetEngine {
    pub fn new(source: Box<dyn InstanceSource>, sink: Box<dyn BudgetSink>) -> Self {
        Self { source, sink }
    }

    /// Engine reading a `.cor` file and appending the budget to it, or to a
    /// copy at `output`.
    pub fn for_files(input: &Path, output: Option<&Path>) -> Self {
        Self::new(
            Box::new(CorFileSource::new(input)),
            Box::new(CorBudgetWriter::new(input, output.map(Path::to_path_buf))),
        )
    }

    /// Load, solve over the reserves, derive the budget and persist it.
    pub fn run(&self, config: &BudgetConfig) -> Result<BudgetReport> {
        let instance = self.source.load().context("Failed to load instance")?;
        let graph = graph_for_instance(&instance).context("Failed to build instance graph")?;
        let terminals = instance.terminals();

        let solver = SteinerSolver::with_options(SteinerOptions {
            seed: config.seed,
            parallel: config.parallel,
            cancel: None,
        });
        let outcome = solver
            .solve(&graph, &terminals)
            .context("Failed to approximate the Steiner tree over the reserves")?;

        let line = BudgetLine::from_lower_bound(outcome.cost, config.percentage);
        let output = self.sink.write(&line).context("Failed to write budget")?;
        info!(
            lower_bound = outcome.cost,
            budget = line.budget,
            output = %output.display(),
            "calculated budget"
        );

        Ok(BudgetReport {
            lower_bound: outcome.cost,
            budget: line.budget,
            percentage: config.percentage,
            seed: config.seed,
            terminals: terminals.iter().map(|node| node.index()).collect(),
            tree_nodes: outcome.tree.nodes().iter().map(|node| node.index()).collect(),
            rounds: outcome.rounds,
            output,
        })
    }
}
