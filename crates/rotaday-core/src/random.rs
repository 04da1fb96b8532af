//! Uniform index sources for the claim draw.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Picks an index uniformly from `0..len`.
///
/// Callers never pass `len == 0`.
pub trait RandomSource {
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible generator for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Mcg128Xsl64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
