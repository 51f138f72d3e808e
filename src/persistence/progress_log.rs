use crate::error::{CourtsideError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Progress point written while a run is going
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSample {
    pub best_fitness: f64,
    pub current_generation: usize,
}

/// JSON array of progress samples, grown one element per append
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Samples written so far; a missing file reads as empty.
    pub fn read(&self) -> Result<Vec<ProgressSample>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CourtsideError::persistence(&self.path, e)),
        };
        serde_json::from_str(&contents).map_err(|e| CourtsideError::CorruptFile {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    pub fn append(&self, sample: ProgressSample) -> Result<()> {
        let mut samples = self.read()?;
        samples.push(sample);
        let json = serde_json::to_string_pretty(&samples)?;
        super::write_atomically(&self.path, json.as_bytes())
    }
}
