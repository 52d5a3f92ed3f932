//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a seedable `StdRng`. In tests a scripted
//! implementation is injected so that shuffled presentation orders are
//! repeatable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// `DeterministicRng` backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Creates an RNG whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.random_range(min..=max)
    }
}

/// Shuffles `items` in place with the Fisher–Yates algorithm.
///
/// Every permutation is equally likely provided `rng` is uniform. Slices
/// longer than `u32::MAX` are not supported.
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_u32_range(0, i as u32) as usize;
        items.swap(i, j.min(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always picks the lower bound, i.e. swaps every element with index 0.
    struct LowestRng;

    impl DeterministicRng for LowestRng {
        fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
            min
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        // Arrange
        let mut a = SeededRng::from_seed(42);
        let mut b = SeededRng::from_seed(42);

        // Act
        let first: Vec<u32> = (0..16).map(|_| a.next_u32_range(0, 100)).collect();
        let second: Vec<u32> = (0..16).map(|_| b.next_u32_range(0, 100)).collect();

        // Assert
        assert_eq!(first, second);
        assert!(first.iter().all(|v| *v <= 100));
    }

    #[test]
    fn test_next_u32_range_with_equal_bounds_returns_min() {
        let mut rng = SeededRng::from_seed(7);
        assert_eq!(rng.next_u32_range(3, 3), 3);
    }

    #[test]
    fn test_shuffle_keeps_every_element() {
        // Arrange
        let mut rng = SeededRng::from_seed(1234);
        let mut items: Vec<usize> = (0..10).collect();

        // Act
        shuffle(&mut items, &mut rng);

        // Assert
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_with_lowest_rng_rotates_deterministically() {
        // Arrange
        let mut items = vec![0, 1, 2, 3];

        // Act
        shuffle(&mut items, &mut LowestRng);

        // Assert: swaps (3,0), (2,0), (1,0) in that order.
        assert_eq!(items, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_shuffle_handles_empty_and_single_slices() {
        let mut empty: Vec<u8> = Vec::new();
        let mut single = vec![9];

        shuffle(&mut empty, &mut LowestRng);
        shuffle(&mut single, &mut LowestRng);

        assert!(empty.is_empty());
        assert_eq!(single, vec![9]);
    }
}
