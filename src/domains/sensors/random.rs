//! Random sources for fabricated sensor values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// A source of uniformly distributed integers.
///
/// Implementations are shared between concurrent read handlers, so they must
/// be `Send + Sync` and draw without blocking for long.
pub trait RandomSource: Send + Sync {
    /// Draw a value from `0..bound`. Callers never pass a zero `bound`.
    fn next_below(&self, bound: u32) -> u32;
}

/// A single pseudo-random generator shared by every reader.
///
/// The generator is seeded once and then only advanced.
pub struct SharedRng {
    rng: Mutex<StdRng>,
}

impl SharedRng {
    /// Seed from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seed from a fixed value, producing a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}

impl RandomSource for SharedRng {
    fn next_below(&self, bound: u32) -> u32 {
        // A panic while holding the lock cannot leave the generator in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }
}
