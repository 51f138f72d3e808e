use std::path::PathBuf;

use chrono::NaiveDate;
use courtside::config::AppConfig;
use courtside::data::JsonMatchProvider;
use courtside::persistence::FileSnapshotStore;
use courtside::predict::predict_score;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    home: String,
    away: String,
    /// Match date (YYYY-MM-DD)
    date: NaiveDate,
    /// Comma separated weights, instead of the stored best chromosome
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    chromosome: Option<Vec<f64>>,
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Print the prediction as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(config: &AppConfig, arg: &PredictArg) -> anyhow::Result<()> {
    let dataset_path = arg.dataset.as_ref().unwrap_or(&config.storage.dataset_file);
    let provider = JsonMatchProvider::open(dataset_path)?;
    let store = FileSnapshotStore::new(&config.storage.snapshot_file);

    let prediction = predict_score(
        &provider,
        &store,
        &arg.home,
        &arg.away,
        arg.date,
        arg.chromosome.clone(),
        &config.evolution,
        &mut rand::thread_rng(),
    )?;

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("{}", prediction);
    }
    Ok(())
}
