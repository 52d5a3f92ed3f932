//! Shared test doubles and fixtures for the Novela narrative engine.

mod clock;
pub mod fixtures;
mod rng;
mod source;

pub use clock::{FixedClock, ManualClock};
pub use rng::{IdentityShuffleRng, MockRng, ScriptedRng};
pub use source::{FailingStorySource, StaticStorySource};
