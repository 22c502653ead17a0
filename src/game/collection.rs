//! Fleet status collection
//!
//! A read-only catalog of cards with a fixed owned flag.

use serde::Serialize;

use super::shop::Rarity;

/// Collection card category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardKind {
    Standard,
    Special,
    Joker,
}

/// Filter tab on the collection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CollectionTab {
    #[default]
    All,
    Standard,
    Special,
    Joker,
}

impl CollectionTab {
    fn admits(&self, kind: CardKind) -> bool {
        match self {
            CollectionTab::All => true,
            CollectionTab::Standard => kind == CardKind::Standard,
            CollectionTab::Special => kind == CardKind::Special,
            CollectionTab::Joker => kind == CardKind::Joker,
        }
    }
}

/// A collectible card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionCard {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: CardKind,
    pub rarity: Rarity,
    pub description: &'static str,
    pub effect: Option<&'static str>,
    pub owned: bool,
    pub count: Option<u32>,
}

const fn standard(
    id: &'static str,
    name: &'static str,
    description: &'static str,
) -> CollectionCard {
    CollectionCard {
        id,
        name,
        kind: CardKind::Standard,
        rarity: Rarity::Common,
        description,
        effect: None,
        owned: true,
        count: Some(4),
    }
}

const fn locked(
    id: &'static str,
    name: &'static str,
    kind: CardKind,
    rarity: Rarity,
    description: &'static str,
    effect: &'static str,
) -> CollectionCard {
    CollectionCard {
        id,
        name,
        kind,
        rarity,
        description,
        effect: Some(effect),
        owned: false,
        count: None,
    }
}

/// Every collectible card
pub static COLLECTION: [CollectionCard; 11] = [
    standard("ace_spades", "Ace of Spades", "The highest card in War"),
    standard("king_hearts", "King of Hearts", "Royal power"),
    standard("queen_diamonds", "Queen of Diamonds", "Elegant nobility"),
    standard("jack_clubs", "Jack of Clubs", "The royal servant"),
    locked(
        "golden_ace",
        "Golden Ace",
        CardKind::Special,
        Rarity::Legendary,
        "Always wins, even against other Aces",
        "Unbeatable card",
    ),
    locked(
        "mirror_card",
        "Mirror Card",
        CardKind::Special,
        Rarity::Epic,
        "Copies opponent's card +1",
        "Copy + 1",
    ),
    locked(
        "wild_seven",
        "Wild Seven",
        CardKind::Special,
        Rarity::Rare,
        "Can become any value you choose",
        "Choose value",
    ),
    locked(
        "double_draw",
        "Double Draw",
        CardKind::Joker,
        Rarity::Rare,
        "Draw 2 cards, play the higher one",
        "Draw 2, play higher",
    ),
    locked(
        "tie_breaker",
        "Tie Breaker",
        CardKind::Joker,
        Rarity::Rare,
        "All ties go to you",
        "Win all ties",
    ),
    locked(
        "ace_supremacy",
        "Ace Supremacy",
        CardKind::Joker,
        Rarity::Epic,
        "All your Aces beat any card",
        "Aces always win",
    ),
    locked(
        "lucky_streak",
        "Lucky Streak",
        CardKind::Joker,
        Rarity::Legendary,
        "Win 3 rounds in a row to activate",
        "3 wins \u{2192} guaranteed next win",
    ),
];

/// View over the collection catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct Collection {
    pub tab: CollectionTab,
}

impl Collection {
    /// Cards visible under the current tab
    pub fn visible(&self) -> Vec<&'static CollectionCard> {
        Self::filter(self.tab)
    }

    /// Cards admitted by a tab
    pub fn filter(tab: CollectionTab) -> Vec<&'static CollectionCard> {
        COLLECTION.iter().filter(|c| tab.admits(c.kind)).collect()
    }

    /// Number of owned cards
    pub fn owned_count() -> usize {
        COLLECTION.iter().filter(|c| c.owned).count()
    }

    /// Number of cards in the catalog
    pub fn total() -> usize {
        COLLECTION.len()
    }

    /// Owned share, rounded to a whole percent
    pub fn progress_percent() -> u32 {
        ((Self::owned_count() as f64 / Self::total() as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(Collection::owned_count(), 4);
        assert_eq!(Collection::total(), 11);
        assert_eq!(Collection::progress_percent(), 36);
    }

    #[test]
    fn test_tab_filters() {
        assert_eq!(Collection::filter(CollectionTab::All).len(), 11);
        assert_eq!(Collection::filter(CollectionTab::Standard).len(), 4);
        assert_eq!(Collection::filter(CollectionTab::Special).len(), 3);
        assert_eq!(Collection::filter(CollectionTab::Joker).len(), 4);
    }

    #[test]
    fn test_visible_follows_tab() {
        let collection = Collection {
            tab: CollectionTab::Special,
        };
        assert!(collection
            .visible()
            .iter()
            .all(|c| c.kind == CardKind::Special && !c.owned));
    }
}
