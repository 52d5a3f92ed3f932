//! Story documents read from the local filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use novela_core::error::DomainError;
use novela_core::source::StorySource;

/// Reads the story document from a file.
#[derive(Debug, Clone)]
pub struct FileStorySource {
    path: PathBuf,
}

impl FileStorySource {
    /// Reads the story at `path` on every fetch.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl StorySource for FileStorySource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, DomainError> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::Infrastructure(format!("failed to read {}: {e}", self.path.display()))
        })
    }
}
