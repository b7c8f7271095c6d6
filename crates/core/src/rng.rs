//! RNG module - seeded randomness for dealing decks
//!
//! Every random decision the generator makes (which notes or chords, which
//! inversion, the final shuffle, card ids) draws from one [`SimpleRng`], so a
//! session seed reproduces the exact same deal.

use crate::types::CardId;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Pick `count` distinct elements of `pool` in random order.
    ///
    /// Returns `None` when the pool is too small; it never repeats an element.
    pub fn sample<T: Copy>(&mut self, pool: &[T], count: usize) -> Option<Vec<T>> {
        if count > pool.len() {
            return None;
        }
        let mut picked = pool.to_vec();
        self.shuffle(&mut picked);
        picked.truncate(count);
        Some(picked)
    }

    /// Fill `out` with random bytes
    pub fn fill_bytes(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    /// Random v4 UUID drawn from this stream
    pub fn next_card_id(&mut self) -> CardId {
        let mut bytes = [0u8; 16];
        self.fill_bytes(&mut bytes);
        CardId(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Current RNG state (seed for a stream that continues from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
