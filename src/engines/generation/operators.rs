use crate::error::{CourtsideError, Result};
use crate::types::{Bounds, Chromosome, RankedPopulation};
use rand::Rng;

/// Fitness-proportionate (roulette wheel) selection.
///
/// Draws a point in `[0, total_fitness)` and walks the ranked list subtracting
/// each fitness until the point falls inside an individual's share. An
/// individual with zero fitness is never picked unless every fitness is zero,
/// in which case the pick is uniform.
pub fn weighted_choice<'a, R: Rng + ?Sized>(
    ranked: &'a RankedPopulation,
    rng: &mut R,
) -> Result<&'a Chromosome> {
    let individuals = ranked.as_slice();
    let last = individuals.last().ok_or(CourtsideError::EmptyPopulation)?;

    if let Some(bad) = individuals
        .iter()
        .find(|s| !s.fitness.is_finite() || s.fitness < 0.0)
    {
        return Err(CourtsideError::DegenerateSelection(format!(
            "fitness {} cannot be used as a selection weight",
            bad.fitness
        )));
    }

    let total_weight: f64 = individuals.iter().map(|s| s.fitness).sum();
    if total_weight <= 0.0 {
        log::debug!("Total fitness is zero, selecting uniformly");
        return Ok(&individuals[rng.gen_range(0..individuals.len())].chromosome);
    }

    let mut spin = rng.gen_range(0.0..total_weight);
    for individual in individuals {
        if spin < individual.fitness {
            return Ok(&individual.chromosome);
        }
        spin -= individual.fitness;
    }

    // Rounding can leave a sliver past the last share
    Ok(&last.chromosome)
}

/// Single-point crossover: swap the tails after a uniform split index.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &[f64],
    parent2: &[f64],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = parent1.len().min(parent2.len());
    let split = if len == 0 { 0 } else { rng.gen_range(0..len) };

    let child1 = parent1[..split].iter().chain(&parent2[split..]).copied().collect();
    let child2 = parent2[..split].iter().chain(&parent1[split..]).copied().collect();

    (child1, child2)
}

/// Per-gene additive mutation.
///
/// Each gene mutates with probability `mutation_chance / 100` by a delta drawn
/// from `magnitude`. A delta that would leave `weight_range` is discarded and
/// the gene keeps its value.
pub fn mutate<R: Rng + ?Sized>(
    chromosome: &[f64],
    mutation_chance: f64,
    magnitude: Bounds,
    weight_range: Bounds,
    rng: &mut R,
) -> Chromosome {
    chromosome
        .iter()
        .map(|&gene| {
            if rng.gen::<f64>() * 100.0 < mutation_chance {
                let delta = rng.gen_range(magnitude.min..=magnitude.max);
                if weight_range.contains(gene + delta) {
                    return gene + delta;
                }
            }
            gene
        })
        .collect()
}

/// Chromosome with every gene uniform in `weight_range`
pub fn random_chromosome<R: Rng + ?Sized>(
    chromosome_size: usize,
    weight_range: Bounds,
    rng: &mut R,
) -> Chromosome {
    (0..chromosome_size)
        .map(|_| rng.gen_range(weight_range.min..=weight_range.max))
        .collect()
}
