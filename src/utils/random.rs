//! Random sources for the fallback scorer.

use crate::core::traits::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Deterministic source backed by a seeded [`StdRng`].
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&self, low: f32, high: f32) -> f32 {
        if is_empty_range(low, high) {
            return low;
        }
        // A poisoned lock only means another thread panicked mid-sample; the
        // generator state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..high)
    }
}

/// Non-deterministic source using the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: f32, high: f32) -> f32 {
        if is_empty_range(low, high) {
            return low;
        }
        rand::thread_rng().gen_range(low..high)
    }
}

fn is_empty_range(low: f32, high: f32) -> bool {
    low.is_nan() || high.is_nan() || low >= high
}

/// Builds the source described by an optional seed.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}
