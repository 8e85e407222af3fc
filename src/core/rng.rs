//! Deterministic random number generation for problem synthesis.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical problem sequences
//! - **Seedable from entropy**: Production sessions draw a fresh seed
//! - **Recorded seed**: The seed is kept so a session can be replayed
//!
//! ```
//! use swipe_math::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! assert_eq!(a.gen_range(1..=12), b.gen_range(1..=12));
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG injected into the problem generator.
///
/// Uses ChaCha8 so the same seed yields the same deck on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given inclusive range.
    pub fn gen_range(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    /// Either `+1` or `-1` with equal probability.
    pub fn unit_sign(&mut self) -> i64 {
        if self.coin() {
            1
        } else {
            -1
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
