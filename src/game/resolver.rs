//! Round resolution
//!
//! Compares the two drawn strengths from the player's point of view.

use serde::{Deserialize, Serialize};

use super::catalog::RankedItem;

/// Result of a single round, relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Lose,
    Tie,
}

impl RoundOutcome {
    /// The same round seen from the other side of the table
    pub fn reversed(&self) -> Self {
        match self {
            RoundOutcome::Win => RoundOutcome::Lose,
            RoundOutcome::Lose => RoundOutcome::Win,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }

    /// Banner text shown after the reveal
    pub fn banner(&self) -> &'static str {
        match self {
            RoundOutcome::Win => ">>> VICTORY <<<",
            RoundOutcome::Lose => ">>> DEFEATED <<<",
            RoundOutcome::Tie => ">>> STALEMATE <<<",
        }
    }
}

/// Rule tweaks an opponent may bring to the table
///
/// Catalog text advertises more (Ace Supremacy, Mirror Card, Tie Breaker and
/// friends), but those are flavor only and never reach the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleModifier {
    /// Equal strengths count as a loss for the player
    TiesFavorOpponent,
}

/// Decide a round
pub fn resolve(
    player: &RankedItem,
    opponent: &RankedItem,
    modifier: Option<RuleModifier>,
) -> RoundOutcome {
    match player.strength.cmp(&opponent.strength) {
        std::cmp::Ordering::Greater => RoundOutcome::Win,
        std::cmp::Ordering::Less => RoundOutcome::Lose,
        std::cmp::Ordering::Equal => match modifier {
            Some(RuleModifier::TiesFavorOpponent) => RoundOutcome::Lose,
            None => RoundOutcome::Tie,
        },
    }
}
