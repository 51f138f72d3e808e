use crate::error::{CourtsideError, Result};
use crate::types::{Population, ScoredChromosome};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Last generation of a run, kept as the seed of the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    pub created_at: DateTime<Local>,
    /// Best chromosome seen during the run
    pub best: Option<ScoredChromosome>,
    /// Best first when the generation was ranked
    pub population: Population,
}

impl GenerationSnapshot {
    pub fn new(population: Population, best: Option<ScoredChromosome>) -> Self {
        Self {
            created_at: Local::now(),
            best,
            population,
        }
    }

    /// Common chromosome length, or `None` when empty or ragged.
    pub fn chromosome_size(&self) -> Option<usize> {
        let first = self.population.first()?.len();
        self.population
            .iter()
            .all(|c| c.len() == first)
            .then_some(first)
    }
}

/// Result of reading a stored snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotLoad {
    Loaded(GenerationSnapshot),
    NotFound,
    Corrupt(String),
}

/// Storage for the generation snapshot shared between runs.
///
/// No locking is done; callers serialise runs that share a store.
pub trait PopulationStore {
    fn load(&self) -> SnapshotLoad;
    fn persist(&mut self, snapshot: &GenerationSnapshot) -> Result<()>;
}

/// JSON file holding a single snapshot, replaced on every persist
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PopulationStore for FileSnapshotStore {
    fn load(&self) -> SnapshotLoad {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SnapshotLoad::NotFound,
            Err(e) => return SnapshotLoad::Corrupt(format!("unreadable: {}", e)),
        };
        match serde_json::from_str(&contents) {
            Ok(snapshot) => SnapshotLoad::Loaded(snapshot),
            Err(e) => SnapshotLoad::Corrupt(e.to_string()),
        }
    }

    fn persist(&mut self, snapshot: &GenerationSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        super::write_atomically(&self.path, json.as_bytes())?;
        log::info!(
            "Saved {} chromosomes to {}",
            snapshot.population.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Store kept in memory, used where runs must not touch disk
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    snapshot: Option<GenerationSnapshot>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: GenerationSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    pub fn snapshot(&self) -> Option<&GenerationSnapshot> {
        self.snapshot.as_ref()
    }
}

impl PopulationStore for MemorySnapshotStore {
    fn load(&self) -> SnapshotLoad {
        match &self.snapshot {
            Some(snapshot) => SnapshotLoad::Loaded(snapshot.clone()),
            None => SnapshotLoad::NotFound,
        }
    }

    fn persist(&mut self, snapshot: &GenerationSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }
}

/// Reads a snapshot file, surfacing failures instead of recovering.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<GenerationSnapshot> {
    let path = path.as_ref();
    match FileSnapshotStore::new(path).load() {
        SnapshotLoad::Loaded(snapshot) => Ok(snapshot),
        SnapshotLoad::NotFound => Err(CourtsideError::persistence(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no snapshot stored"),
        )),
        SnapshotLoad::Corrupt(reason) => Err(CourtsideError::CorruptFile {
            path: path.to_path_buf(),
            reason,
        }),
    }
}
