//! Ranked items and the fleet catalog
//!
//! Every round draws one vessel per side from a fixed table of thirteen ranks.
//! Rank strength runs 2 through 14, with the carrier standing in for the ace.

use serde::{Deserialize, Serialize};

/// Lowest strength value in the fleet
pub const MIN_STRENGTH: u8 = 2;

/// Highest strength value in the fleet
pub const MAX_STRENGTH: u8 = 14;

/// Hull class of a vessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankClass {
    /// Strength 2-3
    Destroyer,
    /// Strength 4-7
    Cruiser,
    /// Strength 8-13 (the face ranks)
    Battleship,
    /// Strength 14 (the ace)
    Carrier,
}

impl RankClass {
    /// Glyph shown on the card face
    pub fn glyph(&self) -> &'static str {
        match self {
            RankClass::Destroyer => "\u{1F6A2}",
            RankClass::Cruiser => "\u{26F5}",
            RankClass::Battleship => "\u{1F6F3}\u{FE0F}",
            RankClass::Carrier => "\u{1F681}",
        }
    }

    /// Whether this class counts as a capital ship
    pub fn is_capital(&self) -> bool {
        matches!(self, RankClass::Battleship | RankClass::Carrier)
    }
}

/// A drawable vessel with a comparable strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    /// Hull class
    pub kind: RankClass,
    /// Comparison value (2-14)
    pub strength: u8,
    /// Rank label (2-10, J, Q, K, A)
    pub label: &'static str,
}

impl RankedItem {
    const fn new(kind: RankClass, strength: u8, label: &'static str) -> Self {
        Self {
            kind,
            strength,
            label,
        }
    }

    /// Look up the catalog entry for a strength value
    pub fn from_strength(strength: u8) -> Option<Self> {
        FLEET.iter().find(|item| item.strength == strength).copied()
    }

    /// Whether this is the top rank
    pub fn is_ace(&self) -> bool {
        self.strength == MAX_STRENGTH
    }
}

impl std::fmt::Display for RankedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.label, self.kind)
    }
}

/// The full fleet, one entry per rank
pub static FLEET: [RankedItem; 13] = [
    RankedItem::new(RankClass::Destroyer, 2, "2"),
    RankedItem::new(RankClass::Destroyer, 3, "3"),
    RankedItem::new(RankClass::Cruiser, 4, "4"),
    RankedItem::new(RankClass::Cruiser, 5, "5"),
    RankedItem::new(RankClass::Cruiser, 6, "6"),
    RankedItem::new(RankClass::Cruiser, 7, "7"),
    RankedItem::new(RankClass::Battleship, 8, "8"),
    RankedItem::new(RankClass::Battleship, 9, "9"),
    RankedItem::new(RankClass::Battleship, 10, "10"),
    RankedItem::new(RankClass::Battleship, 11, "J"),
    RankedItem::new(RankClass::Battleship, 12, "Q"),
    RankedItem::new(RankClass::Battleship, 13, "K"),
    RankedItem::new(RankClass::Carrier, 14, "A"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_covers_every_rank_once() {
        let strengths: Vec<u8> = FLEET.iter().map(|item| item.strength).collect();
        let expected: Vec<u8> = (MIN_STRENGTH..=MAX_STRENGTH).collect();
        assert_eq!(strengths, expected);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(RankedItem::from_strength(3).unwrap().kind, RankClass::Destroyer);
        assert_eq!(RankedItem::from_strength(4).unwrap().kind, RankClass::Cruiser);
        assert_eq!(RankedItem::from_strength(8).unwrap().kind, RankClass::Battleship);
        assert_eq!(RankedItem::from_strength(14).unwrap().kind, RankClass::Carrier);
        assert!(RankedItem::from_strength(14).unwrap().is_ace());
    }

    #[test]
    fn test_unknown_strength() {
        assert!(RankedItem::from_strength(1).is_none());
        assert!(RankedItem::from_strength(15).is_none());
    }

    #[test]
    fn test_face_labels() {
        assert_eq!(RankedItem::from_strength(11).unwrap().label, "J");
        assert_eq!(RankedItem::from_strength(13).unwrap().label, "K");
        assert!(RankClass::Carrier.is_capital());
        assert!(!RankClass::Cruiser.is_capital());
    }

    #[test]
    fn test_glyph_shared_by_class() {
        let cruisers: Vec<&str> = FLEET
            .iter()
            .filter(|item| item.kind == RankClass::Cruiser)
            .map(|item| item.kind.glyph())
            .collect();
        assert_eq!(cruisers.len(), 4);
        assert!(cruisers.iter().all(|g| *g == "\u{26F5}"));
        assert_ne!(RankClass::Destroyer.glyph(), RankClass::Carrier.glyph());
    }
}
