//! Random sources.
//!
//! The blast sampler and the tuner draw through [`RandomSource`] so a host
//! can plug in its own generator and keep its draw sequence intact.
//! [`SeededRandom`] is the built-in xorshift32 implementation; the same seed
//! always gives the same sequence, which keeps blast results replayable.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The two draws the library needs.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform over the full `i32` range.
    fn next_i32(&mut self) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }

    fn next_i32(&mut self) -> i32 {
        (**self).next_i32()
    }
}

/// Deterministic xorshift32 generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Seed 0 is a fixed point of xorshift and is replaced by 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Float in `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Float in `[0, 1)` with 53 bits drawn from two outputs.
    pub fn next_f64(&mut self) -> f64 {
        let hi = (self.next_u32() >> 5) as u64;
        let lo = (self.next_u32() >> 6) as u64;
        ((hi << 26) | lo) as f64 / (1u64 << 53) as f64
    }

    /// Current state, for snapshots.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        // top 24 bits fit an f32 mantissa exactly, so 1.0 is unreachable
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }
}
