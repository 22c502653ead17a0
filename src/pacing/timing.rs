//! Stage delay generation
//!
//! Turns the configured stage delays into concrete timer lengths, optionally
//! with a little random variance so consecutive rounds do not feel mechanical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TimingSettings;

/// Shortest delay variance may produce for a non-zero stage
const MIN_VARIED_DELAY_MS: u64 = 50;

/// A staged pause within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Cards face down, waiting to flip
    Draw,
    /// Cards face up, tallies updated
    Reveal,
    /// Result banner on screen
    Settle,
}

/// Produces stage delays from timing settings
pub struct Pacer {
    timings: TimingSettings,
    rng: StdRng,
}

impl Pacer {
    /// Create a pacer seeded from the operating system
    pub fn new(timings: TimingSettings) -> Self {
        Self {
            timings,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible pacer
    pub fn seeded(timings: TimingSettings, seed: u64) -> Self {
        Self {
            timings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Configured base delay for a stage
    pub fn base_delay(&self, stage: Stage) -> u64 {
        match stage {
            Stage::Draw => self.timings.draw_delay,
            Stage::Reveal => self.timings.reveal_delay,
            Stage::Settle => self.timings.settle_delay,
        }
    }

    /// Delay to schedule for a stage
    pub fn delay(&mut self, stage: Stage) -> u64 {
        let base = self.base_delay(stage);
        self.vary(base, self.timings.variance_percent)
    }

    /// Apply symmetric percentage variance to a delay
    fn vary(&mut self, base_delay_ms: u64, variance_percent: u32) -> u64 {
        if variance_percent == 0 || base_delay_ms == 0 {
            return base_delay_ms;
        }

        let variance = base_delay_ms.saturating_mul(u64::from(variance_percent)) / 100;
        let variance = i64::try_from(variance).unwrap_or(i64::MAX);
        let offset = self.rng.random_range(-variance..=variance);

        base_delay_ms
            .saturating_add_signed(offset)
            .max(MIN_VARIED_DELAY_MS)
    }
}
