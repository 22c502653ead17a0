//! Draw sources
//!
//! A draw source hands out one vessel per call. The production source samples
//! the fleet uniformly with replacement; the scripted source replays a fixed
//! sequence of strengths.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::catalog::{RankedItem, FLEET};

/// Something that produces ranked items for a round
pub trait DrawSource: Send {
    /// Draw the next item
    fn draw(&mut self) -> RankedItem;
}

/// Uniform random draw over the fleet
pub struct RandomDraw {
    rng: StdRng,
}

impl Default for RandomDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomDraw {
    /// Create a draw source seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible draw source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for RandomDraw {
    fn draw(&mut self) -> RankedItem {
        FLEET[self.rng.random_range(0..FLEET.len())]
    }
}

/// Replays a queue of strengths, cycling once exhausted
///
/// Strengths outside the fleet are skipped when the queue is built.
#[derive(Debug, Clone)]
pub struct ScriptedDraw {
    script: Vec<RankedItem>,
    pending: VecDeque<RankedItem>,
}

impl ScriptedDraw {
    /// Build a script from strength values
    pub fn new(strengths: &[u8]) -> Self {
        let script: Vec<RankedItem> = strengths
            .iter()
            .filter_map(|s| RankedItem::from_strength(*s))
            .collect();
        Self {
            pending: script.iter().copied().collect(),
            script,
        }
    }

    /// Build a script from (player, opponent) strength pairs
    pub fn rounds(pairs: &[(u8, u8)]) -> Self {
        let flat: Vec<u8> = pairs.iter().flat_map(|(p, o)| [*p, *o]).collect();
        Self::new(&flat)
    }
}

impl DrawSource for ScriptedDraw {
    fn draw(&mut self) -> RankedItem {
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        // An empty script falls back to the lowest rank
        self.pending.pop_front().unwrap_or(FLEET[0])
    }
}
