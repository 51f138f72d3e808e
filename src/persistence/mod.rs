//! On-disk artefacts of training and validation runs.
//!
//! Writes that replace a whole document go through a temporary sibling file
//! and a rename, so a failed write leaves the previous document intact.

pub mod progress_log;
pub mod results;
pub mod run_log;
pub mod snapshot;

pub use progress_log::{ProgressLog, ProgressSample};
pub use results::{read_validation_report, write_validation_report};
pub use run_log::RunLog;
pub use snapshot::{
    read_snapshot, FileSnapshotStore, GenerationSnapshot, MemorySnapshotStore, PopulationStore,
    SnapshotLoad,
};

use crate::error::{CourtsideError, Result};
use std::io::Write;
use std::path::Path;

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| CourtsideError::persistence(parent, e)),
        _ => Ok(()),
    }
}

pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let mut file = std::fs::File::create(tmp).map_err(|e| CourtsideError::persistence(tmp, e))?;
    let written = file.write_all(contents).and_then(|_| file.sync_all());
    drop(file);

    let result = match written {
        Ok(()) => std::fs::rename(tmp, path).map_err(|e| CourtsideError::persistence(path, e)),
        Err(e) => Err(CourtsideError::persistence(tmp, e)),
    };
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(tmp) {
            log::warn!("Could not remove {}: {}", tmp.display(), e);
        }
    }
    result
}

pub(crate) fn append(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CourtsideError::persistence(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| CourtsideError::persistence(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");

        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("nested/out.json.tmp").exists());
    }

    #[test]
    fn failed_atomic_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("inside"), "x").unwrap();

        let err = write_atomically(&path, b"data").unwrap_err();

        assert!(matches!(err, CourtsideError::Persistence { .. }));
        assert!(!dir.path().join("taken.tmp").exists());
        assert!(path.is_dir());
    }
}
