use crate::error::CourtsideError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), CourtsideError>;
}

pub(crate) fn invalid(section: &str, message: impl AsRef<str>) -> CourtsideError {
    CourtsideError::Configuration(format!("[{}] {}", section, message.as_ref()))
}
