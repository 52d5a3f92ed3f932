//! Ending resolution.

use novela_story::domain::story::{Ending, Finals};
use serde::{Deserialize, Serialize};

/// Minimum score for the good ending.
pub const GOOD_THRESHOLD: u32 = 7;

/// Minimum score for the neutral ending.
pub const NEUTRAL_THRESHOLD: u32 = 4;

/// Score-banded ending tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndingTier {
    /// Score of at least [`GOOD_THRESHOLD`].
    Good,
    /// Score of at least [`NEUTRAL_THRESHOLD`].
    Neutral,
    /// Anything lower.
    Bad,
}

impl EndingTier {
    /// Maps a final score to its tier.
    #[must_use]
    pub fn for_score(score: u32) -> Self {
        if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Bad
        }
    }

    /// Picks this tier's ending from the story finals.
    #[must_use]
    pub fn ending(self, finals: &Finals) -> &Ending {
        match self {
            Self::Good => &finals.good,
            Self::Neutral => &finals.neutral,
            Self::Bad => &finals.bad,
        }
    }

    /// Lowercase tier name, as logged.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Bad => "bad",
        }
    }
}

/// Narrative text of an ending, optionally followed by the final score.
#[must_use]
pub fn ending_text(ending: &Ending, score: u32, show_score: bool) -> String {
    if show_score {
        format!("{}\n\n[Puntuación final: {score} puntos]", ending.text)
    } else {
        ending.text.clone()
    }
}
