//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The automaton never touches process-wide random state.  Every stochastic
//! call (neighbor shuffles, seed placement, exit choice) draws from one
//! `SimRng` handed to the automaton at construction, so a fixed seed replays
//! an identical run.
//!
//! Batch replicas get independent streams seeded by:
//!
//!   seed = base_seed XOR (replica_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive replica indices uniformly across the seed space.
//! Adding replicas at the end of a batch does not disturb earlier ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The injected uniform random source.
///
/// Owned by exactly one automaton.  The type is `Send` but not shared: a
/// parallel batch gives each replica its own `SimRng` via
/// [`SimRng::replica`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from a batch's base seed and a replica index.
    pub fn replica(base_seed: u64, index: u64) -> Self {
        SimRng::new(base_seed ^ index.wrapping_mul(MIXING_CONSTANT))
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
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
