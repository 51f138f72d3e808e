pub mod connectors;
pub mod provider;
pub mod schema;

pub use connectors::{DataValidator, DatasetMetadata, JsonConnector};
pub use provider::{JsonMatchProvider, MatchProvider};
pub use schema::{MatchDataset, StatSchema};
