//! Fetches and parses the story document.
//!
//! The fetch happens once; a failure here is the only fatal error of a play
//! session, and the caller is expected to show it in the narrative region.

use std::sync::Arc;

use novela_core::error::DomainError;
use novela_core::source::StorySource;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::domain::diagnostics::{StoryDiagnostic, diagnose};
use crate::domain::raw::RawStory;
use crate::domain::story::Story;

/// Message shown in the narrative region when the story cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Error: No se pudo cargar el archivo de la historia.";

/// A story ready to play.
#[derive(Debug, Clone)]
pub struct LoadedStory {
    /// The shared, immutable graph.
    pub story: Arc<Story>,
    /// Hex SHA-256 of the raw document.
    pub version_hash: String,
    /// Authoring problems found while loading.
    pub diagnostics: Vec<StoryDiagnostic>,
}

/// Computes the version hash of a raw story document.
#[must_use]
pub fn version_hash(document: &[u8]) -> String {
    format!("{:x}", Sha256::digest(document))
}

/// Parses a raw story document into a classified graph.
///
/// # Errors
///
/// Returns `DomainError::InvalidStory` if the document is not valid JSON or
/// lacks `intro` or `finals`.
pub fn parse_story(document: &[u8]) -> Result<LoadedStory, DomainError> {
    let raw: RawStory = serde_json::from_slice(document)
        .map_err(|e| DomainError::InvalidStory(format!("story parse failed: {e}")))?;
    let story = Story::from_raw(&raw);
    let diagnostics = diagnose(&story);

    Ok(LoadedStory {
        story: Arc::new(story),
        version_hash: version_hash(document),
        diagnostics,
    })
}

/// Fetches the story from `source` and parses it. Diagnostics are logged as
/// warnings.
///
/// # Errors
///
/// Returns the source's error if the fetch fails, or
/// `DomainError::InvalidStory` if parsing fails.
#[instrument(skip(source), fields(source = %source.describe()))]
pub async fn load_story(source: &dyn StorySource) -> Result<LoadedStory, DomainError> {
    let document = source.fetch().await?;
    let loaded = parse_story(&document)?;

    for diagnostic in &loaded.diagnostics {
        warn!(%diagnostic, "story diagnostic");
    }
    info!(
        version_hash = %loaded.version_hash,
        scenes = loaded.story.scenes().len(),
        "story loaded"
    );

    Ok(loaded)
}
