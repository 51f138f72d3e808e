use super::predictor::predict_match;
use crate::types::{Chromosome, MatchRecord, RankedPopulation, ScoredChromosome};

/// Percentage of matches whose first-quarter winner the chromosome predicts.
///
/// Always in `[0, 100]`; an empty match list scores 0.0.
pub fn calculate_fitness(chromosome: &[f64], matches: &[MatchRecord]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }

    let wrong_predictions = matches
        .iter()
        .filter(|m| predict_match(chromosome, m).predicted_winner != m.winner())
        .count();

    let total = matches.len() as f64;
    100.0 * (total - wrong_predictions as f64) / total
}

/// Scores every chromosome and ranks them best first.
pub fn apply_fitness(population: &[Chromosome], matches: &[MatchRecord]) -> RankedPopulation {
    let scored = population
        .iter()
        .map(|chromosome| ScoredChromosome {
            fitness: calculate_fitness(chromosome, matches),
            chromosome: chromosome.clone(),
        })
        .collect();

    RankedPopulation::from_scored(scored)
}
