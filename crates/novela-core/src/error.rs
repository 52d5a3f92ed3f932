//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A scene id was requested that the story does not contain.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// A command was rejected by the current session state.
    #[error("validation error: {0}")]
    Validation(String),

    /// The story document could not be interpreted.
    #[error("invalid story: {0}")]
    InvalidStory(String),

    /// An infrastructure/I/O error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
