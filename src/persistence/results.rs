use crate::engines::validation::ValidationReport;
use crate::error::{CourtsideError, Result};
use std::path::Path;

/// Replaces the validation results document at `path`.
pub fn write_validation_report<P: AsRef<Path>>(path: P, report: &ValidationReport) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;
    super::write_atomically(path, json.as_bytes())?;
    log::info!("Validation results written to {}", path.display());
    Ok(())
}

pub fn read_validation_report<P: AsRef<Path>>(path: P) -> Result<ValidationReport> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| CourtsideError::persistence(path, e))?;
    serde_json::from_str(&contents).map_err(|e| CourtsideError::CorruptFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
