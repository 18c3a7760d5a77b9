//! Deterministic seed mixing and the seeded random stream used by generation.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for the given zero-based attempt. Attempt 0 reuses the caller's seed.
pub fn derive_attempt_seed(initial_seed: u64, attempt: u32) -> u64 {
    if attempt == 0 {
        return initial_seed;
    }
    mix_seed_stream(initial_seed, u64::from(attempt))
}

/// Random stream owned by a single generation attempt.
pub(crate) struct CaveRng {
    inner: ChaCha8Rng,
}

impl CaveRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
    pub fn unit(&mut self) -> f64 {
        (self.inner.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.inner.next_u64() % len as u64) as usize
    }
}
