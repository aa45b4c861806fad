use crate::app::dto::{BudgetConfig, BudgetReport};
use crate::app::engine::BudgetEngine;
use crate::domain::budget::DEFAULT_PERCENTAGE;
use crate::domain::steiner::DEFAULT_SEED;
use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cbtool", version)]
/// Wildlife corridor design instance budget calculator
///
/// Approximates a minimum node-weighted Steiner tree over the reserves of a
/// .cor instance and appends its cost plus a markup as the budget line.
pub struct Cli {
    /// .cor instance file
    #[arg(short = 'i', long = "input", value_name = "FILE", value_parser = existing_file)]
    pub input: PathBuf,
    /// File to write the instance with the budget to. Defaults to extending the input file.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Share added on top of the lower bound, e.g. 0.1 for 10 percent
    #[arg(short = 'b', long = "budget-percent", default_value_t = DEFAULT_PERCENTAGE)]
    pub budget_percent: f64,
    /// Seed for the Steiner tree approximation
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Compute the pairwise paths of each round on a single thread
    #[arg(long)]
    pub serial: bool,
    /// Print the full report as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn config(&self) -> BudgetConfig {
        BudgetConfig {
            percentage: self.budget_percent,
            seed: self.seed,
            parallel: !self.serial,
        }
    }
}

fn existing_file(arg: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("The file {arg} does not exist!"))
    }
}

pub fn run(cli: &Cli) -> Result<BudgetReport> {
    let engine = BudgetEngine::for_files(&cli.input, cli.output.as_deref());
    let report = engine
        .run(&cli.config())
        .with_context(|| format!("Budget calculation failed for {}", cli.input.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Appended budget \"{}\" to instance file: {}",
            report.budget,
            report.output.display()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.cor");
        std::fs::write(&input, "p 0 0\n").unwrap();
        let cli = Cli::try_parse_from(["cbtool", "-i", input.to_str().unwrap()]).unwrap();
        let config = cli.config();
        assert_eq!(config.percentage, 0.1);
        assert_eq!(config.seed, 11);
        assert!(config.parallel);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_missing_input_rejected_by_parser() {
        let err = Cli::try_parse_from(["cbtool", "-i", "/definitely/not/here.cor"]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["cbtool"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.cor");
        std::fs::write(&input, "p 0 0\n").unwrap();
        let cli = Cli::try_parse_from([
            "cbtool",
            "--input",
            input.to_str().unwrap(),
            "-o",
            "out.cor",
            "-b",
            "0.25",
            "-s",
            "7",
            "--serial",
            "--json",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.percentage, 0.25);
        assert_eq!(config.seed, 7);
        assert!(!config.parallel);
        assert_eq!(cli.output, Some(PathBuf::from("out.cor")));
        assert!(cli.json);
    }
}
