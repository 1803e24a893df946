//! Random draws used for shooter selection and cooldown variance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integer draws.
///
/// Formations own one of these so their firing pattern is reproducible
/// when built from a seeded source.
pub trait RandomSource: Send + Sync {
    /// Uniform draw over `[0, n)`. Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
pub struct RngSource<R = StdRng>(pub R);

impl RngSource<StdRng> {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Deterministic source for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send + Sync> RandomSource for RngSource<R> {
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.0.gen_range(0..n)
    }
}
