use super::base::{ScoreGenerator, TrialOutcome};
use crate::config::RunConfig;
use crate::data::{DataValidator, MatchDataset};
use crate::engines::evaluation::calculate_fitness;
use crate::engines::generation::random_chromosome;
use crate::error::Result;
use rand::rngs::StdRng;

/// Baseline: one random chromosome scored once
pub struct RandomScoreGenerator {
    config: RunConfig,
}

impl RandomScoreGenerator {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }
}

impl ScoreGenerator for RandomScoreGenerator {
    fn name(&self) -> &str {
        "random"
    }

    fn description(&self) -> &str {
        "Scores a single random chromosome"
    }

    fn generate(&self, dataset: &MatchDataset, rng: &mut StdRng) -> Result<TrialOutcome> {
        DataValidator::validate_chromosome_size(dataset.schema(), self.config.chromosome_size)?;

        let chromosome = random_chromosome(self.config.chromosome_size, self.config.weight_range, rng);

        Ok(TrialOutcome {
            score: calculate_fitness(&chromosome, dataset.matches()),
            generations: None,
        })
    }
}
