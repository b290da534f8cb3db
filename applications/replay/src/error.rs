/// Replay error types
use thiserror::Error;
use tone_actions::ActionError;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid script: {0}")]
    Script(String),

    #[error("Step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: ActionError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ReplayError {
    fn from(err: config::ConfigError) -> Self {
        ReplayError::Config(err.to_string())
    }
}
