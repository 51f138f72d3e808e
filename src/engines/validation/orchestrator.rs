use super::strategies::{resolve, ScoreGenerator};
use crate::config::{ConfigSection, RunConfig, StrategyConfig, StrategyParams, ValidationConfig};
use crate::data::MatchDataset;
use crate::engines::metrics;
use crate::error::Result;
use crate::types::Chromosome;
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Trials recorded for one configured strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub function: String,
    pub params: StrategyParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<Chromosome>,
    /// Wall-clock seconds per trial
    pub elapsed_seconds: Vec<f64>,
    /// Score per trial
    pub scores: Vec<f64>,
    /// Generations per trial, for evolving strategies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generations: Vec<usize>,
    pub summary: BTreeMap<String, f64>,
}

impl StrategyReport {
    pub fn trials(&self) -> usize {
        self.scores.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed_seconds: f64,
    pub test_cycles: usize,
    /// Keyed by strategy name
    pub results: BTreeMap<String, StrategyReport>,
}

/// Runs every configured strategy `test_cycles` times and collects the scores.
pub struct ValidationOrchestrator {
    test_cycles: usize,
    base: RunConfig,
    rng: StdRng,
}

impl ValidationOrchestrator {
    /// `base` supplies the run parameters a strategy's `params` do not override.
    pub fn new(test_cycles: usize, base: RunConfig) -> Self {
        let rng = match base.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            test_cycles,
            base,
            rng,
        }
    }

    pub fn run(
        &mut self,
        strategies: &[StrategyConfig],
        dataset: &MatchDataset,
    ) -> Result<ValidationReport> {
        ValidationConfig {
            test_cycles: self.test_cycles,
            strategies: strategies.to_vec(),
        }
        .validate()?;

        // Resolve everything first so a bad entry fails before any trial runs
        let resolved = strategies
            .iter()
            .map(|strategy| -> Result<(&StrategyConfig, Box<dyn ScoreGenerator>)> {
                Ok((strategy, resolve(strategy, &self.base)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let started_at = Local::now();
        let started = Instant::now();
        let mut results = BTreeMap::new();

        for (strategy, generator) in resolved {
            let name = strategy.display_name().to_string();
            log::info!(
                "Validating '{}' ({}) over {} trials",
                name,
                generator.description(),
                self.test_cycles
            );

            let report = self.run_trials(strategy, generator.as_ref(), dataset)?;
            if let Some(mean) = report.summary.get("mean_score") {
                log::info!("'{}' mean score {:.2}%", name, mean);
            }
            results.insert(name, report);
        }

        Ok(ValidationReport {
            started_at,
            finished_at: Local::now(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
            test_cycles: self.test_cycles,
            results,
        })
    }

    fn run_trials(
        &mut self,
        strategy: &StrategyConfig,
        generator: &dyn ScoreGenerator,
        dataset: &MatchDataset,
    ) -> Result<StrategyReport> {
        let mut elapsed_seconds = Vec::with_capacity(self.test_cycles);
        let mut scores = Vec::with_capacity(self.test_cycles);
        let mut generations = Vec::new();

        for trial in 0..self.test_cycles {
            let started = Instant::now();
            let outcome = generator.generate(dataset, &mut self.rng)?;
            let elapsed = started.elapsed().as_secs_f64();

            log::debug!(
                "{} trial {}/{}: {:.2}% in {:.3}s",
                generator.name(),
                trial + 1,
                self.test_cycles,
                outcome.score,
                elapsed
            );

            elapsed_seconds.push(elapsed);
            scores.push(outcome.score);
            generations.extend(outcome.generations);
        }

        Ok(StrategyReport {
            function: strategy.function.clone(),
            params: strategy.params.clone(),
            chromosome: strategy.chromosome.clone(),
            summary: metrics::summarize(&scores, &elapsed_seconds),
            elapsed_seconds,
            scores,
            generations,
        })
    }
}
