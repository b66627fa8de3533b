//! Deterministic random number generation for dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Recorded seed**: Entropy-seeded games still expose the seed they used
//!
//! ```
//! use royal_ur::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let faces_a: Vec<bool> = (0..8).map(|_| a.gen_bool(0.5)).collect();
//! let faces_b: Vec<bool> = (0..8).map(|_| b.gen_bool(0.5)).collect();
//! assert_eq!(faces_a, faces_b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing the dice.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
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

    /// Create an RNG seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_bool(0.5), rng2.gen_bool(0.5));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..64).map(|_| rng1.gen_bool(0.5)).collect();
        let seq2: Vec<_> = (0..64).map(|_| rng2.gen_bool(0.5)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let mut rng = GameRng::from_entropy();
        let mut replay = GameRng::new(rng.seed());

        for _ in 0..20 {
            assert_eq!(rng.gen_bool(0.5), replay.gen_bool(0.5));
        }
    }

    #[test]
    fn test_coin_is_roughly_fair() {
        let mut rng = GameRng::new(7);
        let heads = (0..10_000).filter(|_| rng.gen_bool(0.5)).count();

        // 10k flips: standard deviation is 50, allow a generous margin
        assert!((4_700..=5_300).contains(&heads), "heads = {}", heads);
    }
}
