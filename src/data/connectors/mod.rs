mod json;
mod types;
mod validator;

pub use json::JsonConnector;
pub use types::{DatasetMetadata, RawDataset, RawMatch};
pub use validator::DataValidator;
