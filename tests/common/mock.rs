//! Mock port implementations for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use corridor_budget::domain::budget::BudgetLine;
use corridor_budget::domain::instance::Instance;
use corridor_budget::domain::ports::{BudgetSink, InstanceSource};

/// InstanceSource returning a fixed instance, or failing when empty.
pub struct MockInstanceSource {
    pub instance: Option<Instance>,
}

impl MockInstanceSource {
    pub fn new(instance: Instance) -> Self {
        Self {
            instance: Some(instance),
        }
    }

    pub fn failing() -> Self {
        Self { instance: None }
    }
}

impl InstanceSource for MockInstanceSource {
    fn load(&self) -> Result<Instance> {
        self.instance
            .clone()
            .ok_or_else(|| anyhow!("mock instance source has no instance"))
    }
}

/// BudgetSink that records every line it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub lines: Arc<Mutex<Vec<BudgetLine>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<BudgetLine> {
        self.lines.lock().unwrap().clone()
    }
}

impl BudgetSink for RecordingSink {
    fn write(&self, line: &BudgetLine) -> Result<PathBuf> {
        self.lines.lock().unwrap().push(*line);
        Ok(PathBuf::from("recorded.cor"))
    }
}
