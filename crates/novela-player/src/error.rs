//! Novela player — error types.

use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal I/O error.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
