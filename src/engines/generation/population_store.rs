use super::operators::random_chromosome;
use crate::config::RunConfig;
use crate::persistence::{PopulationStore, SnapshotLoad};
use crate::types::{Bounds, Chromosome, Population};
use rand::Rng;
use std::fmt;

/// Why a stored snapshot was not reused
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    ForcedFresh,
    NotFound,
    Corrupt(String),
    Empty,
    SizeMismatch { expected: usize, found: Option<usize> },
    /// A stored gene lies outside the configured weight range
    OutOfRange { gene: f64, range: Bounds },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForcedFresh => write!(f, "fresh population requested"),
            Self::NotFound => write!(f, "no stored snapshot"),
            Self::Corrupt(reason) => write!(f, "stored snapshot is corrupt: {}", reason),
            Self::Empty => write!(f, "stored snapshot is empty"),
            Self::SizeMismatch { expected, found: Some(found) } => write!(
                f,
                "stored chromosomes have {} genes, expected {}",
                found, expected
            ),
            Self::SizeMismatch { expected, found: None } => write!(
                f,
                "stored chromosomes have mixed lengths, expected {}",
                expected
            ),
            Self::OutOfRange { gene, range } => {
                write!(f, "stored gene {} lies outside weight range {}", gene, range)
            }
        }
    }
}

/// Where the first generation came from
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationSource {
    Snapshot { reused: usize, padded: usize },
    Random(FallbackReason),
}

#[derive(Debug, Clone)]
pub struct InitialPopulation {
    pub population: Population,
    pub source: PopulationSource,
}

/// Builds the first generation of a run.
///
/// A stored snapshot is reused when its chromosomes match
/// `config.chromosome_size`, every gene lies in `config.weight_range`, and a
/// fresh start was not requested. A short
/// snapshot is padded with random chromosomes; a long one is kept whole.
pub fn load_initial_population<S, R>(store: &S, config: &RunConfig, rng: &mut R) -> InitialPopulation
where
    S: PopulationStore + ?Sized,
    R: Rng + ?Sized,
{
    let (mut population, reused_or_reason) = match usable_snapshot(store, config) {
        Ok(population) => {
            let reused = population.len();
            (population, Ok(reused))
        }
        Err(reason) => {
            log::info!("Generating random population: {}", reason);
            (Vec::with_capacity(config.population_size), Err(reason))
        }
    };

    let shortfall = config.population_size.saturating_sub(population.len());
    population.extend(
        (0..shortfall).map(|_| random_chromosome(config.chromosome_size, config.weight_range, rng)),
    );

    let source = match reused_or_reason {
        Ok(reused) => {
            log::info!(
                "Reusing {} stored chromosomes, {} generated to fill the population",
                reused,
                shortfall
            );
            PopulationSource::Snapshot {
                reused,
                padded: shortfall,
            }
        }
        Err(reason) => PopulationSource::Random(reason),
    };

    InitialPopulation { population, source }
}

fn usable_snapshot<S>(store: &S, config: &RunConfig) -> Result<Vec<Chromosome>, FallbackReason>
where
    S: PopulationStore + ?Sized,
{
    if config.generate_new_population {
        return Err(FallbackReason::ForcedFresh);
    }
    let snapshot = match store.load() {
        SnapshotLoad::Loaded(snapshot) => snapshot,
        SnapshotLoad::NotFound => return Err(FallbackReason::NotFound),
        SnapshotLoad::Corrupt(reason) => {
            log::warn!("Ignoring stored snapshot: {}", reason);
            return Err(FallbackReason::Corrupt(reason));
        }
    };
    if snapshot.population.is_empty() {
        return Err(FallbackReason::Empty);
    }
    match snapshot.chromosome_size() {
        Some(size) if size == config.chromosome_size => {}
        found => {
            return Err(FallbackReason::SizeMismatch {
                expected: config.chromosome_size,
                found,
            })
        }
    }
    let range = config.weight_range;
    if let Some(&gene) = snapshot.population.iter().flatten().find(|&&g| !range.contains(g)) {
        log::warn!("Ignoring stored snapshot: gene {} outside {}", gene, range);
        return Err(FallbackReason::OutOfRange { gene, range });
    }
    Ok(snapshot.population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{GenerationSnapshot, MemorySnapshotStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(population_size: usize, chromosome_size: usize) -> RunConfig {
        RunConfig {
            population_size,
            chromosome_size,
            ..RunConfig::default()
        }
    }

    fn store_with(population: Population) -> MemorySnapshotStore {
        MemorySnapshotStore::with_snapshot(GenerationSnapshot::new(population, None))
    }

    #[test]
    fn empty_store_generates_random_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let initial = load_initial_population(&MemorySnapshotStore::new(), &config(8, 4), &mut rng);

        assert_eq!(initial.population.len(), 8);
        assert!(initial.population.iter().all(|c| c.len() == 4));
        assert_eq!(initial.source, PopulationSource::Random(FallbackReason::NotFound));
    }

    #[test]
    fn matching_snapshot_is_padded() {
        let mut rng = StdRng::seed_from_u64(2);
        let store = store_with(vec![vec![1.0; 4], vec![2.0; 4], vec![3.0; 4]]);
        let initial = load_initial_population(&store, &config(10, 4), &mut rng);

        assert_eq!(initial.population.len(), 10);
        assert_eq!(initial.population[0], vec![1.0; 4]);
        assert_eq!(initial.population[2], vec![3.0; 4]);
        assert_eq!(initial.source, PopulationSource::Snapshot { reused: 3, padded: 7 });
    }

    #[test]
    fn larger_snapshot_is_not_truncated() {
        let mut rng = StdRng::seed_from_u64(3);
        let store = store_with(vec![vec![0.5; 2]; 12]);
        let initial = load_initial_population(&store, &config(10, 2), &mut rng);

        assert_eq!(initial.population.len(), 12);
    }

    #[test]
    fn mismatched_chromosome_size_is_ignored() {
        let mut rng = StdRng::seed_from_u64(4);
        let store = store_with(vec![vec![1.0; 5]; 20]);
        let initial = load_initial_population(&store, &config(6, 3), &mut rng);

        assert_eq!(initial.population.len(), 6);
        assert!(initial.population.iter().all(|c| c.len() == 3));
        assert_eq!(
            initial.source,
            PopulationSource::Random(FallbackReason::SizeMismatch { expected: 3, found: Some(5) })
        );
    }

    #[test]
    fn out_of_range_snapshot_is_ignored() {
        let mut rng = StdRng::seed_from_u64(6);
        let store = store_with(vec![vec![8.0, -9.0]; 20]);
        let mut cfg = config(20, 2);
        cfg.weight_range = Bounds::new(-1.0, 1.0);
        let initial = load_initial_population(&store, &cfg, &mut rng);

        assert_eq!(initial.population.len(), 20);
        assert!(initial.population.iter().flatten().all(|&g| cfg.weight_range.contains(g)));
        assert_eq!(
            initial.source,
            PopulationSource::Random(FallbackReason::OutOfRange {
                gene: 8.0,
                range: Bounds::new(-1.0, 1.0)
            })
        );
    }

    #[test]
    fn forced_fresh_skips_snapshot() {
        let mut rng = StdRng::seed_from_u64(5);
        let store = store_with(vec![vec![1.0; 3]; 6]);
        let mut cfg = config(6, 3);
        cfg.generate_new_population = true;
        let initial = load_initial_population(&store, &cfg, &mut rng);

        assert_eq!(initial.source, PopulationSource::Random(FallbackReason::ForcedFresh));
        assert!(initial.population.iter().all(|c| c != &vec![1.0; 3]));
    }
}
