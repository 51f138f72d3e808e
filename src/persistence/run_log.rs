use crate::engines::generation::RunReport;
use crate::error::Result;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Append-only text log with one block per finished run
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, report: &RunReport) -> Result<()> {
        super::append(&self.path, &format_block(report))
    }
}

/// Renders the key/value block for one run.
pub fn format_block(report: &RunReport) -> String {
    let mut block = String::new();
    // Writing into a String cannot fail
    let _ = write_block(&mut block, report);
    block
}

fn write_block(out: &mut String, report: &RunReport) -> std::fmt::Result {
    let config = &report.config;

    write!(out, "\n\nTimestamp: {}", report.timestamp)?;
    write!(
        out,
        "\nGenetic Algorithm exited in {:.3} seconds ({}).",
        report.elapsed_seconds, report.stop_reason
    )?;
    write!(out, "\n{} generations passed.", report.generations)?;
    write!(out, "\n\tGenetic Algorithm Parameters:")?;
    write!(out, "\n\t\tfitness_input_size: {}", report.dataset_size)?;
    write!(out, "\n\t\tgood_generations: {}", config.good_generations)?;
    write!(out, "\n\t\tweight_range: {}", config.weight_range)?;
    write!(out, "\n\t\tmutation_chance: {}", config.mutation_chance)?;
    write!(out, "\n\t\tmutation_magnitude: {}", config.mutation_magnitude)?;
    write!(out, "\n\t\tchromosome_size: {}", config.chromosome_size)?;
    write!(out, "\n\t\tpopulation_size: {}", config.population_size)?;
    write!(out, "\n\t\tmax_generations: {}", config.max_generations)?;
    write!(out, "\n\t\tpersistent_individuals: {}", config.persistent_individuals)?;
    write!(out, "\n\t\trandom_individuals: {}", config.random_individuals)?;
    write!(
        out,
        "\n\t\tconsecutive_good_generations: {}",
        report.consecutive_good_generations
    )?;
    write!(out, "\n\tGenetic Algorithm Output:")?;
    match report.final_fitness {
        Some(fitness) => write!(out, "\n\tFinal Score: {}%", fitness)?,
        None => write!(out, "\n\tFinal Score: n/a")?,
    }
    match report.highest_fitness() {
        Some(fitness) => write!(out, "\n\tHighest Fitness: {}", fitness)?,
        None => write!(out, "\n\tHighest Fitness: n/a")?,
    }
    for weight in &report.weights {
        write!(out, "\n\t\t{}: {}", weight.statistic, weight.weight)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::engines::generation::{StatWeight, StopReason};
    use crate::types::ScoredChromosome;

    fn report() -> RunReport {
        RunReport {
            timestamp: "2018-06-20--10-00-00".to_string(),
            elapsed_seconds: 1.5,
            generations: 4,
            stop_reason: StopReason::Converged,
            config: RunConfig::default(),
            dataset_size: 10,
            consecutive_good_generations: 3,
            final_fitness: Some(80.0),
            best: Some(ScoredChromosome { chromosome: vec![0.5, -1.0], fitness: 90.0 }),
            weights: vec![
                StatWeight { statistic: "points".to_string(), weight: 0.5 },
                StatWeight { statistic: "assists".to_string(), weight: -1.0 },
            ],
        }
    }

    #[test]
    fn block_lists_parameters_and_weights() {
        let block = format_block(&report());

        assert!(block.contains("Timestamp: 2018-06-20--10-00-00"));
        assert!(block.contains("4 generations passed."));
        assert!(block.contains("population_size: 50"));
        assert!(block.contains("Final Score: 80%"));
        assert!(block.contains("Highest Fitness: 90"));
        assert!(block.contains("\t\tpoints: 0.5"));
        assert!(block.contains("\t\tassists: -1"));
    }

    #[test]
    fn appends_one_block_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("logs/genetic_algorithm.log"));

        log.append(&report()).unwrap();
        log.append(&report()).unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.matches("Timestamp:").count(), 2);
    }
}
