use super::traits::{invalid, ConfigSection};
use crate::error::CourtsideError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where datasets, snapshots and logs live on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dataset_file: PathBuf,
    pub snapshot_file: PathBuf,
    pub run_log_file: PathBuf,
    pub progress_file: PathBuf,
    pub validation_results_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dataset_file: PathBuf::from("data/matches.json"),
            snapshot_file: PathBuf::from("data/last_generation.json"),
            run_log_file: PathBuf::from("data/logs/genetic_algorithm.log"),
            progress_file: PathBuf::from("data/json/gen/genetic_algorithm.json"),
            validation_results_file: PathBuf::from("data/json/validation/results.json"),
        }
    }
}

impl ConfigSection for StorageConfig {
    fn section_name() -> &'static str {
        "storage"
    }

    fn validate(&self) -> Result<(), CourtsideError> {
        let paths = [
            ("dataset_file", &self.dataset_file),
            ("snapshot_file", &self.snapshot_file),
            ("run_log_file", &self.run_log_file),
            ("progress_file", &self.progress_file),
            ("validation_results_file", &self.validation_results_file),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(invalid(Self::section_name(), format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
