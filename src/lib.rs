//! corridor-budget library: node-weighted Steiner tree approximation and
//! budget calculation for wildlife corridor design instances.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;

pub use domain::budget::compute_budget;
pub use domain::builder::build_graph;
pub use domain::error::{InstanceError, SteinerError};
pub use domain::graph::{Cost, CostGraph};
pub use domain::path::{MinCostPath, find_min_cost_path};
pub use domain::steiner::{SteinerOptions, SteinerOutcome, SteinerSolver, approximate_steiner_tree};
