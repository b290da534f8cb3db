//! Error types for the action surface

use thiserror::Error;
use tone_core::ToneError;

/// Action errors
///
/// Transport failures reported by the audio engine are not errors here;
/// they travel as `TRACK_ERROR` event payloads.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Input could not be normalized
    #[error("Normalization failed: {0}")]
    Normalize(#[from] ToneError),

    /// Operation needs a first track to point `nowPlaying` at
    #[error("{operation} requires at least one track")]
    EmptyTrackList {
        /// Event namespace of the rejected operation
        operation: &'static str,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for action operations
pub type Result<T> = std::result::Result<T, ActionError>;
