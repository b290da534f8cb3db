/// Core error types for Tone Player
use thiserror::Error;

use crate::schema::EntityKind;

/// Result type alias using `ToneError`
pub type Result<T> = std::result::Result<T, ToneError>;

/// Core error type for Tone Player
#[derive(Error, Debug)]
pub enum ToneError {
    /// Input does not match the shape its schema declares
    #[error("Shape mismatch for {kind}: {reason}")]
    ShapeMismatch { kind: EntityKind, reason: String },

    /// An entity object is missing its identity attribute, or carries one
    /// that is neither a string nor a number
    #[error("Cannot normalize {kind} without `{attribute}`")]
    MissingIdentity {
        kind: EntityKind,
        attribute: &'static str,
    },

    /// Schema lookup for a kind the registry never declared
    #[error("Entity kind not declared in schema registry: {0}")]
    UnknownEntity(EntityKind),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ToneError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(kind: EntityKind, reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            kind,
            reason: reason.into(),
        }
    }
}
