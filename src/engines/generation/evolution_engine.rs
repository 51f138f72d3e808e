use crate::config::{ConfigSection, RunConfig};
use crate::data::{DataValidator, MatchDataset};
use crate::engines::evaluation::apply_fitness;
use crate::engines::generation::{
    convergence::ConvergencePolicy,
    population_store::{load_initial_population, PopulationSource},
    reproduction::reproduce_population,
};
use crate::error::{CourtsideError, Result};
use crate::persistence::{GenerationSnapshot, PopulationStore};
use crate::types::{Population, RankedPopulation, ScoredChromosome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why the generation loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Converged,
    MaxGenerations,
    Cancelled,
    TimeLimit,
    /// A callback or reproduction step returned an error
    Failed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Converged => "converged",
            Self::MaxGenerations => "generation limit reached",
            Self::Cancelled => "cancelled",
            Self::TimeLimit => "time limit reached",
            Self::Failed => "failed",
        };
        f.write_str(reason)
    }
}

/// Weight the best chromosome gives one statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatWeight {
    pub statistic: String,
    pub weight: f64,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: String,
    pub elapsed_seconds: f64,
    /// Generations that were scored
    pub generations: usize,
    pub stop_reason: StopReason,
    pub config: RunConfig,
    pub dataset_size: usize,
    pub consecutive_good_generations: usize,
    /// Best fitness of the last scored generation
    pub final_fitness: Option<f64>,
    /// Best chromosome seen over the whole run
    pub best: Option<ScoredChromosome>,
    pub weights: Vec<StatWeight>,
}

impl RunReport {
    pub fn highest_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.fitness)
    }
}

/// Snapshot of the loop state handed to callbacks after each scored generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationProgress {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// Best fitness over all generations so far
    pub highest_fitness: f64,
    pub consecutive_good_generations: usize,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, progress: &GenerationProgress) -> Result<()>;
    fn on_run_complete(&mut self, report: &RunReport) -> Result<()>;
}

pub struct EvolutionEngine {
    config: RunConfig,
    convergence: ConvergencePolicy,
    rng: StdRng,
    cancelled: Arc<AtomicBool>,
    time_limit: Option<Duration>,
}

impl EvolutionEngine {
    /// Normalises and validates `config`, then seeds the generator.
    pub fn new(config: RunConfig) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            convergence: ConvergencePolicy::new(config.good_generations),
            config,
            rng,
            cancelled: Arc::new(AtomicBool::new(false)),
            time_limit: None,
        })
    }

    /// Stop the run after the current generation once `limit` has elapsed.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Setting the flag stops the run at the next generation boundary.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the generation loop, then log the run and persist its last generation.
    pub fn run<S, C>(
        &mut self,
        dataset: &MatchDataset,
        store: &mut S,
        callback: &mut C,
    ) -> Result<RunReport>
    where
        S: PopulationStore + ?Sized,
        C: ProgressCallback + ?Sized,
    {
        DataValidator::validate_chromosome_size(dataset.schema(), self.config.chromosome_size)?;
        DataValidator::validate_minimum_matches(dataset, 1)?;

        let started = Instant::now();
        let timestamp = self.config.timestamp_label();
        self.convergence.reset();

        let initial = load_initial_population(&*store, &self.config, &mut self.rng);
        if let PopulationSource::Snapshot { reused, .. } = initial.source {
            log::debug!("Starting from {} stored chromosomes", reused);
        }
        let mut population = initial.population;

        let mut last_ranked: Option<RankedPopulation> = None;
        let mut best: Option<ScoredChromosome> = None;
        let mut generations = 0;
        let mut stop_reason = StopReason::MaxGenerations;
        let mut failure: Option<CourtsideError> = None;

        for generation in 0..self.config.max_generations {
            if let Some(reason) = self.should_stop(started) {
                log::info!("Stopping before generation {}: {}", generation, reason);
                stop_reason = reason;
                break;
            }
            callback.on_generation_start(generation);

            let ranked = apply_fitness(&population, dataset.matches());
            generations += 1;

            let Some(top) = ranked.best() else {
                break;
            };
            if best.as_ref().is_none_or(|b| top.fitness > b.fitness) {
                best = Some(top.clone());
            }
            let mean_fitness = ranked.iter().map(|s| s.fitness).sum::<f64>() / ranked.len() as f64;

            log::info!(
                "Generation {}: best fitness {:.2}%, mean {:.2}%",
                generation,
                top.fitness,
                mean_fitness
            );
            log::debug!("Best chromosome: {:?}", top.chromosome);

            let converged = self.convergence.check_for_break(&ranked);

            let progress = GenerationProgress {
                generation,
                best_fitness: top.fitness,
                mean_fitness,
                highest_fitness: best.as_ref().map_or(top.fitness, |b| b.fitness),
                consecutive_good_generations: self.convergence.consecutive_good_generations(),
            };
            if let Err(err) = callback.on_generation_complete(&progress) {
                log::error!("Progress callback failed at generation {}: {}", generation, err);
                failure = Some(err);
                stop_reason = StopReason::Failed;
                last_ranked = Some(ranked);
                break;
            }

            if converged {
                stop_reason = StopReason::Converged;
                last_ranked = Some(ranked);
                break;
            }

            if generation + 1 < self.config.max_generations {
                match reproduce_population(&ranked, self.config.population_size, &self.config, &mut self.rng) {
                    Ok(next) => population = next,
                    Err(err) => {
                        log::error!("Reproduction failed after generation {}: {}", generation, err);
                        failure = Some(err);
                        stop_reason = StopReason::Failed;
                        last_ranked = Some(ranked);
                        break;
                    }
                }
            }
            last_ranked = Some(ranked);
        }

        let final_fitness = last_ranked.as_ref().and_then(|r| r.best()).map(|s| s.fitness);
        let weights = best
            .as_ref()
            .map(|b| {
                dataset
                    .schema()
                    .fields()
                    .iter()
                    .zip(&b.chromosome)
                    .map(|(statistic, &weight)| StatWeight {
                        statistic: statistic.clone(),
                        weight,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let report = RunReport {
            timestamp,
            elapsed_seconds: started.elapsed().as_secs_f64(),
            generations,
            stop_reason,
            config: self.config.clone(),
            dataset_size: dataset.len(),
            consecutive_good_generations: self.convergence.consecutive_good_generations(),
            final_fitness,
            best: best.clone(),
            weights,
        };

        log::info!(
            "Genetic algorithm exited after {} generations in {:.3}s ({})",
            report.generations,
            report.elapsed_seconds,
            report.stop_reason
        );
        for weight in &report.weights {
            log::info!("  {}: {}", weight.statistic, weight.weight);
        }

        let snapshot_population: Population = match &last_ranked {
            Some(ranked) => ranked.chromosomes(),
            None => population,
        };
        let snapshot = GenerationSnapshot::new(snapshot_population, best);

        // Loop errors still reach both writes; the first error wins
        let logged = callback.on_run_complete(&report);
        let persisted = store.persist(&snapshot);
        if let Some(err) = failure {
            return Err(err);
        }
        logged.and(persisted)?;

        Ok(report)
    }

    fn should_stop(&self, started: Instant) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }
        match self.time_limit {
            Some(limit) if started.elapsed() >= limit => Some(StopReason::TimeLimit),
            _ => None,
        }
    }
}
