use std::path::PathBuf;

use chrono::NaiveDate;
use courtside::config::{AppConfig, ValidationConfig};
use courtside::data::{JsonMatchProvider, MatchProvider};
use courtside::engines::validation::ValidationOrchestrator;
use courtside::persistence::write_validation_report;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ValidateArg {
    /// JSON strategy list, instead of the configured strategies
    #[arg(long)]
    strategies: Option<PathBuf>,
    /// Trials per strategy
    #[arg(long)]
    test_cycles: Option<usize>,
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Only use matches played on or before this date (YYYY-MM-DD)
    #[arg(long)]
    until: Option<NaiveDate>,
    /// Results file, instead of the configured one
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(config: &AppConfig, arg: &ValidateArg) -> anyhow::Result<()> {
    let strategies = match &arg.strategies {
        Some(path) => ValidationConfig::load_strategies(path)?,
        None => config.validation.strategies.clone(),
    };
    let test_cycles = arg.test_cycles.unwrap_or(config.validation.test_cycles);

    let dataset_path = arg.dataset.as_ref().unwrap_or(&config.storage.dataset_file);
    let dataset = JsonMatchProvider::open(dataset_path)?.training_matches(arg.until)?;

    let mut orchestrator = ValidationOrchestrator::new(test_cycles, config.evolution.clone());
    let report = orchestrator.run(&strategies, &dataset)?;

    let output = arg
        .output
        .as_ref()
        .unwrap_or(&config.storage.validation_results_file);
    write_validation_report(output, &report)?;

    println!("{:<16} {:>10} {:>10} {:>10} {:>12}", "strategy", "mean", "min", "max", "mean time");
    for (name, result) in &report.results {
        let stat = |key: &str| result.summary.get(key).copied().unwrap_or(f64::NAN);
        println!(
            "{:<16} {:>9.2}% {:>9.2}% {:>9.2}% {:>11.3}s",
            name,
            stat("mean_score"),
            stat("min_score"),
            stat("max_score"),
            stat("mean_elapsed_seconds")
        );
    }
    Ok(())
}
