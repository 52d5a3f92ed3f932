//! Story source abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// Where the story document comes from. Fetched exactly once per play
/// session; there is no retry.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Fetch the raw story document.
    async fn fetch(&self) -> Result<Vec<u8>, DomainError>;
}
