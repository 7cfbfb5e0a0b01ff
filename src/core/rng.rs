//! Deterministic random number generation.
//!
//! All randomness in the engine (deck shuffling, tsunami value selection,
//! tsunami placement) flows through `GameRng` so a fixed seed reproduces an
//! identical game. Production sessions seed from entropy; tests pass
//! explicit seeds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG backing every randomized engine operation.
///
/// Uses ChaCha8 for speed while keeping a high-quality stream.
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

    /// Create an RNG seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Draw `k` distinct indices uniformly without replacement from `0..n`.
    ///
    /// Returned in selection order, not sorted.
    ///
    /// # Panics
    ///
    /// Panics if `k > n`.
    pub fn sample_distinct(&mut self, n: usize, k: usize) -> Vec<usize> {
        assert!(k <= n, "Cannot sample {k} distinct values from 0..{n}");
        use rand::seq::SliceRandom;
        let mut pool: Vec<usize> = (0..n).collect();
        pool.shuffle(&mut self.inner);
        pool.truncate(k);
        pool
    }
}
