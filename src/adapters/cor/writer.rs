use crate::domain::budget::BudgetLine;
use crate::domain::error::InstanceError;
use crate::domain::ports::BudgetSink;
use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Appends the budget to a `.cor` file.
///
/// Without an output path the input instance is extended in place; with one,
/// the input is copied there first and the copy is extended.
pub struct CorBudgetWriter {
    input: PathBuf,
    output: Option<PathBuf>,
}

impl CorBudgetWriter {
    pub fn new<P: AsRef<Path>>(input: P, output: Option<PathBuf>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output,
        }
    }

    pub fn append_to<P: AsRef<Path>>(input: P) -> Self {
        Self::new(input, None)
    }

    pub fn copy_to<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Self {
        Self::new(input, Some(output.as_ref().to_path_buf()))
    }

    /// File the budget ends up in.
    pub fn target(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}

impl BudgetSink for CorBudgetWriter {
    fn write(&self, line: &BudgetLine) -> Result<PathBuf> {
        let target = self.target().to_path_buf();
        if let Some(output) = &self.output {
            if !same_file(&self.input, output) {
                fs::copy(&self.input, output).map_err(io_error(output))?;
            }
        }
        append_budget(&target, line)?;
        info!(
            path = %target.display(),
            budget = line.budget,
            "appended budget to instance file"
        );
        Ok(target)
    }
}

fn append_budget(path: &Path, line: &BudgetLine) -> Result<(), InstanceError> {
    let existing = fs::read(path).map_err(io_error(path))?;
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(io_error(path))?;
    let mut text = String::new();
    if existing.last().is_some_and(|&byte| byte != b'\n') {
        text.push('\n');
    }
    text.push_str(&line.comment());
    text.push('\n');
    text.push_str(&line.directive());
    text.push('\n');
    file.write_all(text.as_bytes()).map_err(io_error(path))
}

/// Copying a file onto itself would truncate it.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> InstanceError + '_ {
    move |source| InstanceError::Io {
        path: path.display().to_string(),
        source,
    }
}
