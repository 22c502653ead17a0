//! Round pacing
//!
//! Matches are staged to the card animations: a pause after the draw, another
//! after the reveal, and a last one while the result is shown. This module
//! provides:
//! - Stage delays derived from the timing settings
//! - A virtual-clock timer queue with cancellation tokens, so leaving the
//!   battle screen or resetting a match drops pending transitions

pub mod scheduler;
pub mod timing;

pub use scheduler::{CancelToken, Scheduler};
pub use timing::{Pacer, Stage};
