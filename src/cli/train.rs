use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use courtside::config::AppConfig;
use courtside::data::{JsonMatchProvider, MatchProvider};
use courtside::engines::generation::{EvolutionEngine, FileProgressCallback};
use courtside::persistence::{FileSnapshotStore, ProgressLog, RunLog};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Dataset file, instead of the configured one
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Only train on matches played on or before this date (YYYY-MM-DD)
    #[arg(long)]
    until: Option<NaiveDate>,
    /// Ignore the stored snapshot and start from random chromosomes
    #[arg(long)]
    fresh: bool,
    #[arg(long)]
    max_generations: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many seconds, keeping the best generation so far
    #[arg(long)]
    time_limit: Option<u64>,
}

pub(crate) fn run(config: &AppConfig, arg: &TrainArg) -> anyhow::Result<()> {
    let dataset_path = arg.dataset.as_ref().unwrap_or(&config.storage.dataset_file);
    let provider = JsonMatchProvider::open(dataset_path)
        .with_context(|| format!("cannot load dataset {}", dataset_path.display()))?;
    let dataset = provider.training_matches(arg.until)?;

    let mut run_config = config.evolution.clone();
    run_config.generate_new_population |= arg.fresh;
    if let Some(max_generations) = arg.max_generations {
        run_config.max_generations = max_generations;
    }
    if arg.seed.is_some() {
        run_config.seed = arg.seed;
    }
    run_config.timestamp = Some(Local::now());

    let mut engine = EvolutionEngine::new(run_config)?;
    if let Some(seconds) = arg.time_limit {
        engine = engine.with_time_limit(Duration::from_secs(seconds));
    }

    let cancel = engine.cancel_handle();
    ctrlc::set_handler(move || {
        log::warn!("Interrupted, finishing the current generation");
        cancel.store(true, Ordering::Relaxed);
    })
    .context("cannot install the interrupt handler")?;

    let mut store = FileSnapshotStore::new(&config.storage.snapshot_file);
    let mut callback = FileProgressCallback::new(
        ProgressLog::new(&config.storage.progress_file),
        RunLog::new(&config.storage.run_log_file),
    );

    let report = engine.run(&dataset, &mut store, &mut callback)?;

    println!(
        "{} generations, stopped: {} ({:.3}s)",
        report.generations, report.stop_reason, report.elapsed_seconds
    );
    if let Some(best) = &report.best {
        println!("Highest fitness: {:.2}%", best.fitness);
        for weight in &report.weights {
            println!("  {:<24} {:>10.4}", weight.statistic, weight.weight);
        }
    }
    Ok(())
}
