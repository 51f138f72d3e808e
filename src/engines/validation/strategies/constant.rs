use super::base::{ScoreGenerator, TrialOutcome};
use crate::data::{DataValidator, MatchDataset};
use crate::engines::evaluation::calculate_fitness;
use crate::error::Result;
use crate::types::Chromosome;
use rand::rngs::StdRng;

/// Baseline: a fixed, supplied chromosome
pub struct ConstantScoreGenerator {
    chromosome: Chromosome,
}

impl ConstantScoreGenerator {
    pub fn new(chromosome: Chromosome) -> Self {
        Self { chromosome }
    }
}

impl ScoreGenerator for ConstantScoreGenerator {
    fn name(&self) -> &str {
        "constant"
    }

    fn description(&self) -> &str {
        "Scores a fixed chromosome"
    }

    fn generate(&self, dataset: &MatchDataset, _rng: &mut StdRng) -> Result<TrialOutcome> {
        DataValidator::validate_chromosome_size(dataset.schema(), self.chromosome.len())?;

        Ok(TrialOutcome {
            score: calculate_fitness(&self.chromosome, dataset.matches()),
            generations: None,
        })
    }
}
