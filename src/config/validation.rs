use super::evolution::RunConfig;
use super::traits::{invalid, ConfigSection};
use crate::error::CourtsideError;
use crate::types::{Bounds, Chromosome};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Trials run per strategy
    pub test_cycles: usize,
    pub strategies: Vec<StrategyConfig>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            test_cycles: 5,
            strategies: vec![
                StrategyConfig::new("genetic"),
                StrategyConfig::new("random"),
            ],
        }
    }
}

/// One entry of the validation strategy list.
///
/// `function` is resolved by the validation harness; unknown names are
/// rejected there before any trial runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Key used in the results document; defaults to `function`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub function: String,
    #[serde(default)]
    pub params: StrategyParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<Chromosome>,
}

impl StrategyConfig {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            name: None,
            function: function.into(),
            params: StrategyParams::default(),
            chromosome: None,
        }
    }

    pub fn with_chromosome(mut self, chromosome: Chromosome) -> Self {
        self.chromosome = Some(chromosome);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.function)
    }
}

/// Per-strategy overrides of the evolution section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub good_generations: Option<usize>,
    pub weight_range: Option<Bounds>,
    pub mutation_chance: Option<f64>,
    pub mutation_magnitude: Option<Bounds>,
    pub chromosome_size: Option<usize>,
    pub population_size: Option<usize>,
    pub max_generations: Option<usize>,
    pub persistent_individuals: Option<usize>,
    pub random_individuals: Option<usize>,
}

impl StrategyParams {
    /// Layers these overrides on top of `base`.
    pub fn apply_to(&self, base: &RunConfig) -> RunConfig {
        let mut config = base.clone();
        if let Some(v) = self.good_generations {
            config.good_generations = v;
        }
        if let Some(v) = self.weight_range {
            config.weight_range = v;
        }
        if let Some(v) = self.mutation_chance {
            config.mutation_chance = v;
        }
        if let Some(v) = self.mutation_magnitude {
            config.mutation_magnitude = v;
        }
        if let Some(v) = self.chromosome_size {
            config.chromosome_size = v;
        }
        if let Some(v) = self.population_size {
            config.population_size = v;
        }
        if let Some(v) = self.max_generations {
            config.max_generations = v;
        }
        if let Some(v) = self.persistent_individuals {
            config.persistent_individuals = v;
        }
        if let Some(v) = self.random_individuals {
            config.random_individuals = v;
        }
        config
    }
}

impl ValidationConfig {
    /// Reads a JSON strategy list such as
    /// `[{"function": "constant", "chromosome": [1.0, 2.0]}]`.
    pub fn load_strategies<P: AsRef<Path>>(path: P) -> Result<Vec<StrategyConfig>, CourtsideError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CourtsideError::persistence(path, e))?;
        let strategies: Vec<StrategyConfig> = serde_json::from_str(&contents).map_err(|e| {
            CourtsideError::Configuration(format!(
                "Failed to parse strategies in {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(strategies)
    }
}

impl ConfigSection for ValidationConfig {
    fn section_name() -> &'static str {
        "validation"
    }

    fn validate(&self) -> Result<(), CourtsideError> {
        if self.test_cycles == 0 {
            return Err(invalid(Self::section_name(), "test_cycles must be at least 1"));
        }
        let mut seen = HashSet::new();
        for strategy in &self.strategies {
            if !seen.insert(strategy.display_name()) {
                return Err(invalid(
                    Self::section_name(),
                    format!("duplicate strategy name '{}'", strategy.display_name()),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_list() {
        let json = r#"[
            {"function": "genetic", "params": {"population_size": 20, "weight_range": [-5, 5]}},
            {"function": "random"},
            {"function": "constant", "chromosome": [1.0, -2.5, 3.0]}
        ]"#;
        let strategies: Vec<StrategyConfig> = serde_json::from_str(json).unwrap();

        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[0].params.population_size, Some(20));
        assert_eq!(strategies[0].params.weight_range, Some(Bounds::new(-5.0, 5.0)));
        assert_eq!(strategies[2].chromosome.as_deref(), Some(&[1.0, -2.5, 3.0][..]));
    }

    #[test]
    fn params_override_base() {
        let params = StrategyParams {
            population_size: Some(12),
            max_generations: Some(3),
            ..StrategyParams::default()
        };
        let config = params.apply_to(&RunConfig::default());

        assert_eq!(config.population_size, 12);
        assert_eq!(config.max_generations, 3);
        assert_eq!(config.chromosome_size, RunConfig::default().chromosome_size);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let config = ValidationConfig {
            test_cycles: 1,
            strategies: vec![StrategyConfig::new("random"), StrategyConfig::new("random")],
        };
        assert!(config.validate().is_err());

        let renamed = ValidationConfig {
            test_cycles: 1,
            strategies: vec![
                StrategyConfig::new("random"),
                StrategyConfig::new("random").with_name("random-2"),
            ],
        };
        assert!(renamed.validate().is_ok());
    }
}
