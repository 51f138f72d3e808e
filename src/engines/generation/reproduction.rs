use super::operators::{crossover, mutate, random_chromosome, weighted_choice};
use crate::config::RunConfig;
use crate::error::Result;
use crate::types::{Population, RankedPopulation};
use rand::Rng;

/// Builds the next generation from a ranked one.
///
/// Layout of the result, in order:
/// 1. offspring: parents picked by [`weighted_choice`], crossed over and
///    mutated, two children per pair
/// 2. the top `persistent_individuals` chromosomes, unchanged
/// 3. `random_individuals` fresh random chromosomes
///
/// The result always holds exactly `population_size` chromosomes. When the
/// offspring slot count is odd the second child of the last pair is dropped,
/// and elites missing from a short ranked list are replaced by random
/// chromosomes.
pub fn reproduce_population<R: Rng + ?Sized>(
    ranked: &RankedPopulation,
    population_size: usize,
    config: &RunConfig,
    rng: &mut R,
) -> Result<Population> {
    let persistent = config.persistent_individuals.min(population_size);
    let random = config.random_individuals.min(population_size - persistent);
    let offspring_slots = population_size - persistent - random;

    let mut next_generation = Vec::with_capacity(population_size);

    if offspring_slots > 0 && ranked.iter().all(|s| s.fitness == 0.0) {
        log::warn!("Every chromosome scored zero; parents are picked uniformly");
    }

    while next_generation.len() < offspring_slots {
        let parent1 = weighted_choice(ranked, rng)?;
        let parent2 = weighted_choice(ranked, rng)?;

        let (child1, child2) = crossover(parent1, parent2, rng);

        next_generation.push(mutate(
            &child1,
            config.mutation_chance,
            config.mutation_magnitude,
            config.weight_range,
            rng,
        ));
        if next_generation.len() < offspring_slots {
            next_generation.push(mutate(
                &child2,
                config.mutation_chance,
                config.mutation_magnitude,
                config.weight_range,
                rng,
            ));
        }
    }

    let elites = ranked.iter().take(persistent).map(|s| s.chromosome.clone());
    next_generation.extend(elites);

    let missing_elites = persistent - ranked.len().min(persistent);
    next_generation.extend(
        (0..missing_elites + random)
            .map(|_| random_chromosome(config.chromosome_size, config.weight_range, rng)),
    );

    log::debug!(
        "Reproduced {} offspring, {} elites, {} random",
        offspring_slots,
        persistent - missing_elites,
        random + missing_elites
    );

    Ok(next_generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::apply_fitness;
    use crate::types::{Bounds, MatchRecord, ScoredChromosome};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(population_size: usize, persistent: usize, random: usize) -> RunConfig {
        RunConfig {
            population_size,
            chromosome_size: 3,
            persistent_individuals: persistent,
            random_individuals: random,
            mutation_chance: 20.0,
            ..RunConfig::default()
        }
    }

    fn ranked(n: usize) -> RankedPopulation {
        RankedPopulation::from_scored(
            (0..n)
                .map(|i| ScoredChromosome {
                    chromosome: vec![i as f64; 3],
                    fitness: i as f64 * 10.0,
                })
                .collect(),
        )
    }

    #[test]
    fn result_has_population_size() {
        let mut rng = StdRng::seed_from_u64(1);
        for (size, persistent, random) in [(10, 2, 2), (11, 2, 2), (6, 6, 0), (7, 0, 0), (1, 0, 0), (8, 4, 4)] {
            let cfg = config(size, persistent, random);
            let next = reproduce_population(&ranked(10), size, &cfg, &mut rng).unwrap();
            assert_eq!(next.len(), size, "size {} persistent {} random {}", size, persistent, random);
            assert!(next.iter().all(|c| c.len() == 3));
        }
    }

    #[test]
    fn elites_follow_offspring_unchanged() {
        let mut rng = StdRng::seed_from_u64(2);
        let cfg = config(10, 2, 2);
        let next = reproduce_population(&ranked(10), 10, &cfg, &mut rng).unwrap();

        assert_eq!(next[6], vec![9.0; 3]);
        assert_eq!(next[7], vec![8.0; 3]);
    }

    #[test]
    fn random_individuals_stay_in_weight_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cfg = config(6, 0, 6);
        cfg.weight_range = Bounds::new(100.0, 101.0);
        let next = reproduce_population(&ranked(4), 6, &cfg, &mut rng).unwrap();

        assert!(next.iter().flatten().all(|&g| (100.0..=101.0).contains(&g)));
    }

    #[test]
    fn short_ranked_list_pads_elites_with_random() {
        let mut rng = StdRng::seed_from_u64(4);
        let cfg = config(6, 4, 0);
        let next = reproduce_population(&ranked(2), 6, &cfg, &mut rng).unwrap();

        assert_eq!(next.len(), 6);
        assert_eq!(next[2], vec![1.0; 3]);
        assert_eq!(next[3], vec![0.0; 3]);
    }

    #[test]
    fn size_is_stable_across_generations() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = config(20, 4, 2);
        let matches: Vec<MatchRecord> = (0..10)
            .map(|i| {
                MatchRecord::new(
                    [i as f64, 1.0, 2.0].into_iter().collect(),
                    [5.0, 1.0, 0.0].into_iter().collect(),
                    i > 5,
                )
            })
            .collect();

        let mut population: Population = (0..20)
            .map(|_| random_chromosome(3, cfg.weight_range, &mut rng))
            .collect();
        for _ in 0..15 {
            let ranked = apply_fitness(&population, &matches);
            population = reproduce_population(&ranked, 20, &cfg, &mut rng).unwrap();
            assert_eq!(population.len(), 20);
        }
    }

    #[test]
    fn empty_ranked_population_is_an_error() {
        let mut rng = StdRng::seed_from_u64(6);
        let cfg = config(4, 0, 0);
        assert!(reproduce_population(&RankedPopulation::default(), 4, &cfg, &mut rng).is_err());
    }
}
