use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourtsideError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Dataset validation error: {0}")]
    DatasetValidation(String),

    #[error("No matches for {team} before {date}")]
    NoTeamHistory { team: String, date: NaiveDate },

    #[error("Unknown validation strategy: {0}")]
    UnknownValidationStrategy(String),

    #[error("Degenerate selection: {0}")]
    DegenerateSelection(String),

    #[error("Cannot select from an empty population")]
    EmptyPopulation,

    #[error("Persistence error at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt file at {path}: {reason}")]
    CorruptFile { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CourtsideError {
    /// Wraps an IO failure with the path that caused it.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CourtsideError>;
