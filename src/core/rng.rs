//! Deterministic random number generation for dealing.
//!
//! Same seed, same deal: level layouts stay reproducible across runs, which
//! keeps deals replayable and tests stable.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used to shuffle and deal cards.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct DealRng {
    inner: ChaCha8Rng,
}

impl DealRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
