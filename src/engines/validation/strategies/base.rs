use crate::data::MatchDataset;
use crate::error::Result;
use rand::rngs::StdRng;

/// Result of a single validation trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Fitness of the predictor the trial produced
    pub score: f64,
    /// Generations run, for strategies that evolve
    pub generations: Option<usize>,
}

/// A way of producing a predictor whose score the harness records.
pub trait ScoreGenerator {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run one trial against the dataset
    fn generate(&self, dataset: &MatchDataset, rng: &mut StdRng) -> Result<TrialOutcome>;
}
