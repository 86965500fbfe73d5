//! Random number generation for the dungeon crawler.
//!
//! Uses a seeded ChaCha RNG for reproducibility (save/replay).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Generation random number generator.
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - restored games recreate the stream
/// from the original seed.
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GenRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GenRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GenRng::new(seed))
    }
}

impl GenRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replace the stream with a fresh one for the given seed
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Returns 0..n-1, or 0 if n is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns 1..=n, or 0 if n is 0
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// Inclusive-uniform integer draw over lo..=hi
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Percentage die: 1..=100
    pub fn percent_roll(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }

    /// Returns true with probability percent/100
    pub fn chance(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rn2(2) == 0
    }

    /// Choose a random element from a slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }
}

impl Default for GenRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = GenRng::new(42);
        for _ in 0..1000 {
            assert!(rng.rn2(10) < 10);
        }
    }

    #[test]
    fn test_rnd_bounds() {
        let mut rng = GenRng::new(42);
        for _ in 0..1000 {
            let n = rng.rnd(6);
            assert!((1..=6).contains(&n));
        }
        assert_eq!(rng.rnd(0), 0);
    }

    #[test]
    fn test_range_inclusive() {
        let mut rng = GenRng::new(42);
        let mut hit_lo = false;
        let mut hit_hi = false;
        for _ in 0..1000 {
            let n = rng.range(3, 7);
            assert!((3..=7).contains(&n));
            hit_lo |= n == 3;
            hit_hi |= n == 7;
        }
        assert!(hit_lo && hit_hi);
    }

    #[test]
    fn test_percent_roll_bounds() {
        let mut rng = GenRng::new(42);
        for _ in 0..1000 {
            let n = rng.percent_roll();
            assert!((1..=100).contains(&n));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut a = GenRng::new(42);
        let mut b = GenRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.rn2(100), b.rn2(100));
        }
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut a = GenRng::new(7);
        let first: Vec<u32> = (0..10).map(|_| a.rn2(1000)).collect();
        a.reseed(7);
        let second: Vec<u32> = (0..10).map(|_| a.rn2(1000)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = GenRng::new(42);
        assert_eq!(rng.rn2(0), 0);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(9, 2), 9);
        assert!(rng.pick::<u8>(&[]).is_none());
    }
}
