use clap::{Parser, Subcommand};
use courtside::config::ConfigManager;
use std::path::PathBuf;

use self::{predict::PredictArg, show_config::ShowConfigArg, train::TrainArg, validate::ValidateArg};

mod predict;
mod show_config;
mod train;
mod validate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Configuration file (TOML or JSON); COURTSIDE__* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve chromosomes against the match dataset
    Train(#[clap(flatten)] TrainArg),
    /// Benchmark the genetic algorithm against baseline predictors
    Validate(#[clap(flatten)] ValidateArg),
    /// Predict the first-quarter winner of one fixture
    Predict(#[clap(flatten)] PredictArg),
    /// Print the effective configuration
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let manager = ConfigManager::load(args.config.as_ref())?;

    match args.mode {
        Mode::Train(arg) => train::run(manager.get(), &arg)?,
        Mode::Validate(arg) => validate::run(manager.get(), &arg)?,
        Mode::Predict(arg) => predict::run(manager.get(), &arg)?,
        Mode::ShowConfig(arg) => show_config::run(&manager, &arg)?,
    }
    Ok(())
}
