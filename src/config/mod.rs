//! Configuration module
//!
//! Handles session settings: currency rules, match length and stage timing.

pub mod settings;

pub use settings::{Settings, TimingSettings};

/// Errors raised while loading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}
