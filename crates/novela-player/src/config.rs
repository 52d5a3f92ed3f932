//! Player configuration from environment variables.

use std::path::PathBuf;

use crate::error::AppError;

/// Story file read when `NOVELA_STORY_PATH` is unset.
pub const DEFAULT_STORY_PATH: &str = "story.json";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Runtime settings of the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Story document on disk.
    pub story_path: PathBuf,
    /// Seed for reproducible shuffles; OS entropy when `None`.
    pub seed: Option<u64>,
    /// Append the final score to the ending text.
    pub show_final_score: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl PlayerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let story_path = lookup("NOVELA_STORY_PATH")
            .filter(|p| !p.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORY_PATH), PathBuf::from);

        let seed = lookup("NOVELA_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("NOVELA_SEED must be a valid u64: {e}")))
            })
            .transpose()?;

        let show_final_score = match lookup("NOVELA_SHOW_SCORE").as_deref().map(str::trim) {
            None | Some("true" | "1") => true,
            Some("false" | "0") => false,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "NOVELA_SHOW_SCORE must be true or false, got {other:?}"
                )));
            }
        };

        let log_format = match lookup("NOVELA_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "NOVELA_LOG_FORMAT must be json or pretty, got {other:?}"
                )));
            }
        };

        Ok(Self {
            story_path,
            seed,
            show_final_score,
            log_format,
        })
    }
}
