pub mod base;
pub mod constant;
pub mod genetic;
pub mod random;

pub use base::{ScoreGenerator, TrialOutcome};
pub use constant::ConstantScoreGenerator;
pub use genetic::GeneticScoreGenerator;
pub use random::RandomScoreGenerator;

use crate::config::{ConfigSection, RunConfig, StrategyConfig};
use crate::error::{CourtsideError, Result};

/// Names accepted in a strategy's `function` field
pub const KNOWN_FUNCTIONS: [&str; 3] = ["genetic", "random", "constant"];

/// Builds the generator a strategy entry names.
///
/// `params` are layered over `base`; the resulting run parameters are
/// validated here so a bad entry fails before any trial runs.
pub fn resolve(strategy: &StrategyConfig, base: &RunConfig) -> Result<Box<dyn ScoreGenerator>> {
    let config = strategy.params.apply_to(base).normalized();

    match strategy.function.as_str() {
        "genetic" => {
            config.validate()?;
            Ok(Box::new(GeneticScoreGenerator::new(config)))
        }
        "random" => {
            config.validate()?;
            Ok(Box::new(RandomScoreGenerator::new(config)))
        }
        "constant" => {
            let chromosome = strategy.chromosome.clone().ok_or_else(|| {
                CourtsideError::Configuration(format!(
                    "strategy '{}' uses the constant function but has no chromosome",
                    strategy.display_name()
                ))
            })?;
            Ok(Box::new(ConstantScoreGenerator::new(chromosome)))
        }
        other => Err(CourtsideError::UnknownValidationStrategy(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_functions() {
        let base = RunConfig::default();
        for function in KNOWN_FUNCTIONS {
            let strategy = StrategyConfig::new(function).with_chromosome(vec![1.0; 11]);
            assert_eq!(resolve(&strategy, &base).unwrap().name(), function);
        }
    }

    #[test]
    fn unknown_function_is_rejected() {
        let Err(err) = resolve(&StrategyConfig::new("bogus"), &RunConfig::default()) else {
            panic!("bogus function resolved");
        };
        assert!(matches!(err, CourtsideError::UnknownValidationStrategy(name) if name == "bogus"));
    }

    #[test]
    fn constant_requires_chromosome() {
        let Err(err) = resolve(&StrategyConfig::new("constant"), &RunConfig::default()) else {
            panic!("constant resolved without a chromosome");
        };
        assert!(matches!(err, CourtsideError::Configuration(_)));
    }

    #[test]
    fn invalid_params_fail_at_resolution() {
        let mut strategy = StrategyConfig::new("genetic");
        strategy.params.population_size = Some(0);
        assert!(matches!(
            resolve(&strategy, &RunConfig::default()),
            Err(CourtsideError::Configuration(_))
        ));
    }
}
