use super::evolution_engine::{GenerationProgress, ProgressCallback, RunReport};
use crate::error::Result;
use crate::persistence::{ProgressLog, ProgressSample, RunLog};

/// Generations between two progress samples
pub const PROGRESS_SAMPLE_INTERVAL: usize = 5;

/// Writes progress samples and the run log block to disk
pub struct FileProgressCallback {
    progress: ProgressLog,
    run_log: RunLog,
}

impl FileProgressCallback {
    pub fn new(progress: ProgressLog, run_log: RunLog) -> Self {
        Self { progress, run_log }
    }
}

impl ProgressCallback for FileProgressCallback {
    fn on_generation_complete(&mut self, progress: &GenerationProgress) -> Result<()> {
        if progress.generation % PROGRESS_SAMPLE_INTERVAL != 0 {
            return Ok(());
        }
        self.progress.append(ProgressSample {
            best_fitness: progress.best_fitness,
            current_generation: progress.generation,
        })
    }

    fn on_run_complete(&mut self, report: &RunReport) -> Result<()> {
        self.run_log.append(report)?;
        log::info!("Run logged to {}", self.run_log.path().display());
        Ok(())
    }
}

/// Discards all progress; used by validation trials
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {
    fn on_generation_complete(&mut self, _progress: &GenerationProgress) -> Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, _report: &RunReport) -> Result<()> {
        Ok(())
    }
}
