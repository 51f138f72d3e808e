use super::base::{ScoreGenerator, TrialOutcome};
use crate::config::RunConfig;
use crate::data::MatchDataset;
use crate::engines::generation::{EvolutionEngine, NullProgressCallback};
use crate::error::Result;
use crate::persistence::MemorySnapshotStore;
use rand::rngs::StdRng;
use rand::Rng;

/// Full genetic run per trial, scored by the best fitness it reached.
///
/// Every trial starts from a fresh random population in a throwaway store,
/// so trials are independent and the on-disk snapshot is never touched.
pub struct GeneticScoreGenerator {
    config: RunConfig,
}

impl GeneticScoreGenerator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: RunConfig {
                generate_new_population: true,
                ..config
            },
        }
    }
}

impl ScoreGenerator for GeneticScoreGenerator {
    fn name(&self) -> &str {
        "genetic"
    }

    fn description(&self) -> &str {
        "Evolves a chromosome with the genetic algorithm"
    }

    fn generate(&self, dataset: &MatchDataset, rng: &mut StdRng) -> Result<TrialOutcome> {
        let config = RunConfig {
            seed: Some(rng.gen()),
            ..self.config.clone()
        };
        let mut engine = EvolutionEngine::new(config)?;
        let report = engine.run(dataset, &mut MemorySnapshotStore::new(), &mut NullProgressCallback)?;

        Ok(TrialOutcome {
            score: report.highest_fitness().unwrap_or(0.0),
            generations: Some(report.generations),
        })
    }
}
