use crate::types::RankedPopulation;

/// Fitness an individual must exceed to count as good
pub const GOOD_FITNESS_THRESHOLD: f64 = 70.0;

/// A generation is good when at least `len / GOOD_SHARE_DIVISOR` individuals are good.
pub const GOOD_SHARE_DIVISOR: usize = 10;

/// Decides when a run has converged.
///
/// Each ranked generation gets a good/bad verdict; the run stops once
/// `target_good_generations` good verdicts arrive in a row.
#[derive(Debug, Clone)]
pub struct ConvergencePolicy {
    target_good_generations: usize,
    consecutive_good_generations: usize,
    fitness_threshold: f64,
}

impl ConvergencePolicy {
    /// A target of zero behaves like one.
    pub fn new(target_good_generations: usize) -> Self {
        Self {
            target_good_generations: target_good_generations.max(1),
            consecutive_good_generations: 0,
            fitness_threshold: GOOD_FITNESS_THRESHOLD,
        }
    }

    pub fn with_fitness_threshold(mut self, threshold: f64) -> Self {
        self.fitness_threshold = threshold;
        self
    }

    /// Judges one generation and updates the streak counter.
    pub fn evaluate_population(&mut self, ranked: &RankedPopulation) -> bool {
        let good_individuals = ranked
            .iter()
            .filter(|s| s.fitness > self.fitness_threshold)
            .count();

        let is_good = good_individuals >= ranked.len() / GOOD_SHARE_DIVISOR;

        if is_good {
            self.consecutive_good_generations += 1;
        } else {
            self.consecutive_good_generations = 0;
        }

        is_good
    }

    /// Whether the run should stop after this generation.
    pub fn check_for_break(&mut self, ranked: &RankedPopulation) -> bool {
        self.evaluate_population(ranked);
        self.consecutive_good_generations >= self.target_good_generations
    }

    pub fn consecutive_good_generations(&self) -> usize {
        self.consecutive_good_generations
    }

    pub fn target_good_generations(&self) -> usize {
        self.target_good_generations
    }

    pub fn reset(&mut self) {
        self.consecutive_good_generations = 0;
    }
}
