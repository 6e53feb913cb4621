//! Randomized cycle durations.
//!
//! A fresh duration is drawn at loop entry and after every toggle, uniformly
//! from the closed range `[min_cycle_ms, max_cycle_ms]`.

use crate::config::LightConfig;
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Source of cycle durations for one toggling loop.
#[derive(Debug)]
pub struct CycleTimer {
    rng: ChaCha8Rng,
    range: Uniform<u64>,
}

impl CycleTimer {
    /// Creates a timer for `config`'s cycle bounds.
    ///
    /// Seeded from `config.seed` when set, otherwise from OS entropy.
    /// `config` must already be validated.
    #[must_use]
    pub fn new(config: &LightConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rng,
            range: Uniform::new_inclusive(config.min_cycle_ms, config.max_cycle_ms),
        }
    }

    /// Draws the duration of the next cycle.
    pub fn next_cycle(&mut self) -> Duration {
        Duration::from_millis(self.rng.sample(self.range))
    }
}
