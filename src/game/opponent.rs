//! Opponent profiles
//!
//! The admirals a player can engage from the tactical map. Profiles are
//! static; only the first sector is open.

use serde::Serialize;

use super::resolver::RuleModifier;

/// Highest difficulty tier
pub const MAX_DIFFICULTY: u8 = 3;

/// A static opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpponentProfile {
    /// Map node id
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Portrait glyph
    pub avatar: &'static str,
    /// Threat level (1-3)
    pub difficulty: u8,
    /// Rule actually applied when resolving rounds
    pub rule_modifier: Option<RuleModifier>,
    /// Rule text shown under the portrait
    pub special_rule: &'static str,
    /// Credits paid out when the player wins the match
    pub reward_on_win: u32,
    /// Fleet name
    pub fleet: &'static str,
    /// Map sector
    pub sector: &'static str,
    /// Whether the map node can be selected
    pub unlocked: bool,
}

impl OpponentProfile {
    /// Threat rating as filled and empty stars
    pub fn difficulty_stars(&self) -> String {
        let filled = self.difficulty.min(MAX_DIFFICULTY) as usize;
        format!(
            "{}{}",
            "\u{2605}".repeat(filled),
            "\u{2606}".repeat(MAX_DIFFICULTY as usize - filled)
        )
    }

    /// Look up an admiral by map id
    pub fn by_id(id: u32) -> Option<&'static OpponentProfile> {
        ADMIRALS.iter().find(|a| a.id == id)
    }

    /// The admiral a battle defaults to
    pub fn default_opponent() -> &'static OpponentProfile {
        &ADMIRALS[0]
    }
}

/// Every admiral on the tactical map
pub static ADMIRALS: [OpponentProfile; 3] = [
    OpponentProfile {
        id: 1,
        name: "Admiral Rookie",
        avatar: "\u{1F468}\u{200D}\u{2708}\u{FE0F}",
        difficulty: 1,
        rule_modifier: None,
        special_rule: "Standard naval engagement",
        reward_on_win: 25,
        fleet: "Patrol Fleet",
        sector: "Alpha Sector",
        unlocked: true,
    },
    OpponentProfile {
        id: 2,
        name: "Captain Storm",
        avatar: "\u{1F9D1}\u{200D}\u{2708}\u{FE0F}",
        difficulty: 2,
        rule_modifier: Some(RuleModifier::TiesFavorOpponent),
        special_rule: "Ties favor the enemy",
        reward_on_win: 40,
        fleet: "Strike Force",
        sector: "Beta Sector",
        unlocked: false,
    },
    OpponentProfile {
        id: 3,
        name: "Fleet Admiral",
        avatar: "\u{1F469}\u{200D}\u{2708}\u{FE0F}",
        difficulty: 3,
        // "Capital ships only" is display text; no modifier backs it
        rule_modifier: None,
        special_rule: "Capital ships only",
        reward_on_win: 60,
        fleet: "Battle Group",
        sector: "Gamma Sector",
        unlocked: false,
    },
];
