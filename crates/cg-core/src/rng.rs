//! Injectable, seedable random source for layout generation.
//!
//! Every stochastic step (cell shuffling, park sizing, lot scattering,
//! footprint packing, tree scatter) draws from one `GenRng` passed by
//! `&mut`.  Two runs with the same seed and configuration therefore produce
//! identical layouts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct GenRng(SmallRng);

impl GenRng {
    pub fn new(seed: u64) -> Self {
        GenRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, e.g. one per generation phase.
    pub fn child(&mut self, offset: u64) -> GenRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        GenRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform `f32` in `[low, high)`.  Returns `low` when the range is empty
    /// or inverted instead of panicking.
    #[inline]
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if low < high { self.0.gen_range(low..high) } else { low }
    }

    /// Uniform integer in `low..=high`; `low` when the range is inverted.
    #[inline]
    pub fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if low < high { self.0.gen_range(low..=high) } else { low }
    }

    /// Uniform index in `0..len`.  `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "GenRng::index on an empty range");
        if len <= 1 { 0 } else { self.0.gen_range(0..len) }
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
