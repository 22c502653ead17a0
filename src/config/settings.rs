//! Session settings
//!
//! Defines every tunable the match engine reads, with presets for the shipped
//! game and for headless play.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::game::ledger::STARTING_BALANCE;

/// Longest pause accepted for any single stage (ms)
pub const MAX_STAGE_DELAY_MS: u64 = 60_000;

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Credits a new session starts with
    pub starting_balance: u32,
    /// Credits lost when the opponent wins a match
    pub wager: u32,
    /// Round wins needed to take the match (3 for best of 5)
    pub required_wins: u32,
    /// Optional cap on rounds per match; `None` lets tie streaks run on
    pub round_limit: Option<u32>,
    /// Seed for the draw source; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Stage timing
    pub timings: TimingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            wager: 10,
            required_wins: 3,
            round_limit: None,
            seed: None,
            timings: TimingSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_wins == 0 {
            return Err(ConfigError::Invalid(
                "required_wins must be at least 1".to_string(),
            ));
        }
        if let Some(limit) = self.round_limit {
            if limit < self.required_wins {
                return Err(ConfigError::Invalid(format!(
                    "round_limit {} is below required_wins {}",
                    limit, self.required_wins
                )));
            }
        }
        for (name, delay) in [
            ("draw_delay", self.timings.draw_delay),
            ("reveal_delay", self.timings.reveal_delay),
            ("settle_delay", self.timings.settle_delay),
        ] {
            if delay > MAX_STAGE_DELAY_MS {
                return Err(ConfigError::Invalid(format!(
                    "{} {} exceeds {} ms",
                    name, delay, MAX_STAGE_DELAY_MS
                )));
            }
        }
        if self.timings.variance_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "variance_percent {} exceeds 100",
                self.timings.variance_percent
            )));
        }
        Ok(())
    }

    /// Settings with every stage delay removed, for headless play
    pub fn instant() -> Self {
        Self {
            timings: TimingSettings::instant(),
            ..Default::default()
        }
    }

    /// Settings that stop a match after five rounds
    pub fn capped_preset() -> Self {
        Self {
            round_limit: Some(5),
            ..Default::default()
        }
    }
}

/// Delays between match stages, matched to the card animations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// From the draw to the reveal (ms)
    pub draw_delay: u64,
    /// From the reveal to the settled result (ms)
    pub reveal_delay: u64,
    /// How long the settled result stays up before the next round (ms)
    pub settle_delay: u64,
    /// Random variance applied to each delay (percent, 0 disables)
    pub variance_percent: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            draw_delay: 500,
            reveal_delay: 1000,
            settle_delay: 2000,
            variance_percent: 0,
        }
    }
}

impl TimingSettings {
    /// No delays at all
    pub fn instant() -> Self {
        Self {
            draw_delay: 0,
            reveal_delay: 0,
            settle_delay: 0,
            variance_percent: 0,
        }
    }

    /// Full length of one round
    pub fn round_length(&self) -> u64 {
        self.draw_delay
            .saturating_add(self.reveal_delay)
            .saturating_add(self.settle_delay)
    }
}
