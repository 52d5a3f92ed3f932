//! Test story sources — `StorySource` implementations for tests.

use async_trait::async_trait;
use novela_core::error::DomainError;
use novela_core::source::StorySource;

/// A story source that returns a fixed document.
#[derive(Debug, Clone)]
pub struct StaticStorySource {
    document: String,
}

impl StaticStorySource {
    /// Create a source that serves `document`.
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

#[async_trait]
impl StorySource for StaticStorySource {
    fn describe(&self) -> String {
        "static".to_owned()
    }

    async fn fetch(&self) -> Result<Vec<u8>, DomainError> {
        Ok(self.document.clone().into_bytes())
    }
}

/// A story source that always fails. Useful for testing the fetch-failure
/// path.
#[derive(Debug)]
pub struct FailingStorySource;

#[async_trait]
impl StorySource for FailingStorySource {
    fn describe(&self) -> String {
        "failing".to_owned()
    }

    async fn fetch(&self) -> Result<Vec<u8>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
