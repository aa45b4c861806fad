use crate::domain::budget::BudgetLine;
use crate::domain::instance::Instance;
use anyhow::Result;
use std::path::PathBuf;

/// Instance source port (implemented by adapters)
pub trait InstanceSource: Send + Sync {
    fn load(&self) -> Result<Instance>;
}

/// Destination for a computed budget
pub trait BudgetSink: Send + Sync {
    /// Persist `line` and return where it was written.
    fn write(&self, line: &BudgetLine) -> Result<PathBuf>;
}
