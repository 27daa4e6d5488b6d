//! RNG module - uniform piece selection
//!
//! Pieces are drawn uniformly (kind and rotation independently), so the game only
//! needs "a uniform integer in `[a, b]`". [`RandomSource`] is that capability.
//!
//! Also provides a simple LCG for deterministic testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integers in an inclusive range
pub trait RandomSource {
    /// Uniform value in `[a, b]`. Callers guarantee `a <= b`.
    fn range_inclusive(&mut self, a: u32, b: u32) -> u32;
}

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

    /// Current internal state (can be used to resume the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn range_inclusive(&mut self, a: u32, b: u32) -> u32 {
        // Low bits of an LCG are weak; take the high half before reducing.
        (self.next_u32() >> 16) % (b - a + 1) + a
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Non-deterministic source backed by `rand`'s standard generator
#[derive(Debug, Clone)]
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn range_inclusive(&mut self, a: u32, b: u32) -> u32 {
        self.inner.gen_range(a..=b)
    }
}

/// Replays a fixed list of values, cycling when exhausted. Values outside the
/// requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, a: u32, b: u32) -> u32 {
        if self.values.is_empty() {
            return a;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(a, b)
    }
}
