use super::traits::{invalid, ConfigSection};
use crate::error::CourtsideError;
use crate::types::Bounds;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Tunable parameters of one genetic-algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub population_size: usize,
    pub chromosome_size: usize,
    /// Bounds for freshly generated genes and for mutated genes
    pub weight_range: Bounds,
    /// Per-gene mutation probability, in percent
    pub mutation_chance: f64,
    /// Bounds of the delta added to a mutating gene
    pub mutation_magnitude: Bounds,
    /// Top ranked chromosomes copied unchanged into the next generation
    pub persistent_individuals: usize,
    /// Fresh random chromosomes injected into every new generation
    pub random_individuals: usize,
    /// Consecutive good generations required before the run stops
    pub good_generations: usize,
    pub max_generations: usize,
    /// Ignore any stored snapshot and start from random chromosomes
    pub generate_new_population: bool,
    pub seed: Option<u64>,
    pub timestamp: Option<DateTime<Local>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            chromosome_size: 11,
            weight_range: Bounds::new(-10.0, 10.0),
            mutation_chance: 1.0,
            mutation_magnitude: Bounds::new(-1.0, 1.0),
            persistent_individuals: 6,
            random_individuals: 6,
            good_generations: 3,
            max_generations: 100,
            generate_new_population: false,
            seed: None,
            timestamp: None,
        }
    }
}

impl RunConfig {
    /// Rounds odd persistent/random counts up to the next even number.
    ///
    /// Reproduction fills the remaining slots with parent pairs, so both
    /// counts are kept even.
    pub fn normalized(mut self) -> Self {
        self.persistent_individuals = round_up_to_even(self.persistent_individuals);
        self.random_individuals = round_up_to_even(self.random_individuals);
        self
    }

    /// Slots left for offspring once elites and random newcomers are placed.
    pub fn offspring_slots(&self) -> usize {
        self.population_size
            .saturating_sub(self.persistent_individuals + self.random_individuals)
    }

    /// Timestamp rendered the way run logs label runs (`2018-06-20--13-45-02`).
    pub fn timestamp_label(&self) -> String {
        self.timestamp
            .unwrap_or_else(Local::now)
            .format("%Y-%m-%d--%H-%M-%S")
            .to_string()
    }
}

fn round_up_to_even(n: usize) -> usize {
    if n % 2 != 0 {
        n + 1
    } else {
        n
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CourtsideError> {
        let section = Self::section_name();
        if self.population_size == 0 {
            return Err(invalid(section, "population_size must be at least 1"));
        }
        if self.chromosome_size == 0 {
            return Err(invalid(section, "chromosome_size must be at least 1"));
        }
        if !self.weight_range.is_valid() {
            return Err(invalid(
                section,
                format!("weight_range {} must be finite with min <= max", self.weight_range),
            ));
        }
        if !self.mutation_magnitude.is_valid() {
            return Err(invalid(
                section,
                format!(
                    "mutation_magnitude {} must be finite with min <= max",
                    self.mutation_magnitude
                ),
            ));
        }
        if !(0.0..=100.0).contains(&self.mutation_chance) {
            return Err(invalid(section, "mutation_chance must be between 0 and 100"));
        }
        let reserved = self.persistent_individuals + self.random_individuals;
        if reserved > self.population_size {
            return Err(invalid(
                section,
                format!(
                    "persistent_individuals + random_individuals ({}) exceeds population_size ({})",
                    reserved, self.population_size
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_counts_are_rounded_up() {
        let config = RunConfig {
            persistent_individuals: 5,
            random_individuals: 3,
            ..RunConfig::default()
        }
        .normalized();

        assert_eq!(config.persistent_individuals, 6);
        assert_eq!(config.random_individuals, 4);
    }

    #[test]
    fn even_counts_are_untouched() {
        let config = RunConfig {
            persistent_individuals: 4,
            random_individuals: 0,
            ..RunConfig::default()
        }
        .normalized();

        assert_eq!(config.persistent_individuals, 4);
        assert_eq!(config.random_individuals, 0);
    }

    #[test]
    fn rejects_reserved_slots_above_population() {
        let config = RunConfig {
            population_size: 10,
            persistent_individuals: 6,
            random_individuals: 6,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_weight_range() {
        let config = RunConfig {
            weight_range: Bounds::new(5.0, -5.0),
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(RunConfig::default().validate().is_ok());
        assert_eq!(RunConfig::default().offspring_slots(), 38);
    }
}
