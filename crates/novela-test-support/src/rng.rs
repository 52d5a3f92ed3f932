//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use std::collections::VecDeque;

use novela_core::rng::DeterministicRng;

/// An RNG that always returns `min`. Suitable for tests that do not depend
/// on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Plays back a script of draws, clamped into the requested range. Once the
/// script is spent every draw returns `max`, which leaves the rest of a
/// Fisher–Yates shuffle untouched.
///
/// A shuffle of `n` items makes `n - 1` draws, from `i = n - 1` down to 1;
/// draw `k` picks the index swapped with position `n - 1 - k`.
#[derive(Debug)]
pub struct ScriptedRng {
    script: VecDeque<u32>,
}

impl ScriptedRng {
    /// Creates an RNG that returns `draws` in order.
    #[must_use]
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: draws.into_iter().collect(),
        }
    }
}

impl DeterministicRng for ScriptedRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.script
            .pop_front()
            .map_or(max, |draw| draw.clamp(min, max.max(min)))
    }
}

/// Returns `max` for every range draw, so a Fisher–Yates shuffle swaps each
/// element with itself and presentation order equals story order.
#[derive(Debug)]
pub struct IdentityShuffleRng;

impl DeterministicRng for IdentityShuffleRng {
    fn next_u32_range(&mut self, _min: u32, max: u32) -> u32 {
        max
    }
}
