pub mod traits;
pub mod evolution;
pub mod storage;
pub mod validation;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use traits::ConfigSection;
pub use evolution::RunConfig;
pub use storage::StorageConfig;
pub use validation::{StrategyConfig, StrategyParams, ValidationConfig};
