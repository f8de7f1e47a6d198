//! Seeded randomness
//!
//! The only source of entropy in the game. A seed string is hashed with
//! FNV-1a (64-bit) and the hash seeds a ChaCha8 stream, so the same string
//! yields the same draws on every platform and every run.
//!
//! Stream labels:
//! - `<seed>-reroll-<n>`: draw number `n` (board draws and replacements)
//! - `<seed>-shuffle`: display order of a freshly generated board

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hash::Hasher;

/// A deterministic FNV-1a 64-bit hasher.
///
/// `DefaultHasher` is randomized per process and cannot seed anything reproducible.
#[derive(Debug)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// FNV-1a hash of a string's UTF-8 bytes.
pub fn hash_label(label: &str) -> u64 {
    let mut hasher = FnvHasher::new();
    hasher.write(label.as_bytes());
    hasher.finish()
}

/// Generator keyed by an arbitrary label.
pub fn rng_for(label: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_label(label))
}

/// Generator for draw number `index` of the day seeded by `seed`.
pub fn draw_rng(seed: &str, index: u32) -> ChaCha8Rng {
    rng_for(&format!("{}-reroll-{}", seed, index))
}

/// Generator for the display shuffle of the board seeded by `seed`.
pub fn shuffle_rng(seed: &str) -> ChaCha8Rng {
    rng_for(&format!("{}-shuffle", seed))
}
