//! Random number generation for dungeon layouts
//!
//! Uses a seeded ChaCha RNG so a layout can be regenerated from its seed.
//! Every stage of the pipeline draws from the same stream, so the order of
//! calls is part of the output: reordering draws changes the dungeon.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng for reproducible generation.
/// Note: RNG state is not serialized - only the seed is, and deserializing
/// restarts the stream from the beginning.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for DungeonRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DungeonRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(DungeonRng::new(seed))
    }
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `min..max`.
    ///
    /// An empty range (`max <= min`) yields `min` and consumes nothing from
    /// the stream. Room sizing relies on this when a node is barely larger
    /// than the minimum room size.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform float in `0.0..1.0`
    pub fn value(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Returns true with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.value() < p
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.value() > 0.5
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let len = i32::try_from(items.len()).unwrap_or(i32::MAX);
            Some(&items[self.range(0, len) as usize])
        }
    }
}
