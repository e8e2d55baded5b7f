//! Deterministic RNG wrapper shared by every randomized algorithm.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `StepRng`, seeded from [`RunConfig::seed`]
//! (or an explicit seed in tests).  Because a run is single-threaded and the
//! observer cannot touch the RNG, the same seed always reproduces the same
//! sequence of steps: shuffles, bogo permutations, random pivots, maze
//! carving, and randomized search all draw from this one stream.
//!
//! [`RunConfig::seed`]: crate::RunConfig::seed

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Per-run deterministic RNG.
pub struct StepRng(SmallRng);

impl StepRng {
    pub fn new(seed: u64) -> Self {
        StepRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Fair coin flip.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.0.r#gen()
    }

    /// Uniform index into a collection of length `len`.
    ///
    /// # Panics
    /// Panics if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
