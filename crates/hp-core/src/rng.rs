//! Simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! All randomness (node placement, exit placement, spawn nodes) is drawn
//! from one `SmallRng` owned by the controller.  A fixed seed therefore
//! reproduces the exact same networks and packet spawns, which is what the
//! tests and the `playground --seed` flag rely on.  Without a seed the RNG
//! is drawn from OS entropy so every session gets a fresh layout.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only from the single simulation thread.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy; runs are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Seeded when `seed` is `Some`, entropy-backed otherwise.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None    => Self::from_entropy(),
        }
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform `f64` in `[lo, hi)`.  Collapses to `lo` when the range is empty
    /// or inverted instead of panicking like `gen_range` would.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo { self.0.gen_range(lo..hi) } else { lo }
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
