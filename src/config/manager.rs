use super::{
    evolution::RunConfig,
    storage::StorageConfig,
    traits::ConfigSection,
    validation::ValidationConfig,
};
use crate::error::CourtsideError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `COURTSIDE__EVOLUTION__POPULATION_SIZE=80`.
pub const ENV_PREFIX: &str = "COURTSIDE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: RunConfig,
    pub storage: StorageConfig,
    pub validation: ValidationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CourtsideError> {
        self.evolution.validate()?;
        self.storage.validate()?;
        self.validation.validate()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers defaults, the optional file at `path` and environment overrides.
    ///
    /// A missing file is not an error; the defaults and environment still apply.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, CourtsideError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }
        let config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(Self { config })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CourtsideError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| CourtsideError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path.as_ref(), toml_str)
            .map_err(|e| CourtsideError::persistence(path.as_ref(), e))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), CourtsideError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut updated = self.config.clone();
        f(&mut updated);
        updated.validate()?;
        self.config = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bounds;

    #[test]
    fn loads_partial_toml_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courtside.toml");
        std::fs::write(
            &path,
            "[evolution]\npopulation_size = 24\nweight_range = [-3.0, 3.0]\n\n[validation]\ntest_cycles = 2\n",
        )
        .unwrap();

        let manager = ConfigManager::load(Some(&path)).unwrap();
        let config = manager.get();

        assert_eq!(config.evolution.population_size, 24);
        assert_eq!(config.evolution.weight_range, Bounds::new(-3.0, 3.0));
        assert_eq!(config.evolution.chromosome_size, RunConfig::default().chromosome_size);
        assert_eq!(config.validation.test_cycles, 2);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(manager.get().evolution, RunConfig::default());
    }

    #[test]
    fn invalid_update_is_rejected_and_not_applied() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| c.evolution.population_size = 0);

        assert!(result.is_err());
        assert_eq!(manager.get().evolution.population_size, 50);
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut manager = ConfigManager::new();
        manager.update(|c| c.evolution.max_generations = 7).unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(reloaded.get().evolution.max_generations, 7);
    }
}
