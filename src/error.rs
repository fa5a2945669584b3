use thiserror::Error;

use crate::jenkins::JenkinsError;

/// Everything that can stop a trigger run. The `Display` text is what the run
/// reports as its failure message.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// A required input is missing or the settings could not be loaded.
    #[error("{0}")]
    Configuration(String),

    /// `jobParams` is not a JSON object.
    #[error("{0}")]
    Parse(String),

    /// Metadata fetch or build trigger failed.
    #[error(transparent)]
    Remote(#[from] JenkinsError),
}

impl TriggerError {
    pub fn missing_input(name: &str) -> Self {
        TriggerError::Configuration(format!("Input required and not supplied: {name}"))
    }
}
