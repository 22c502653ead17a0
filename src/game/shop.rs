//! Armory shop
//!
//! Items are bought with ledger credits. Purchases are remembered for the
//! session only and have no effect on round resolution.

use std::collections::BTreeSet;

use serde::Serialize;

use super::ledger::CurrencyLedger;

/// What a shop item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Card,
    Joker,
    Upgrade,
}

/// Item rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Accent color used for the item frame
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "#FFFFFF",
            Rarity::Rare => "#4A90E2",
            Rarity::Epic => "#9B59B6",
            Rarity::Legendary => "#FFD700",
        }
    }
}

/// A purchasable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub kind: ItemKind,
    pub rarity: Rarity,
    /// Short effect blurb (display only)
    pub effect: &'static str,
}

/// Result of a purchase guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PurchaseCheck {
    /// Purchase may proceed
    Ok,
    /// Balance is below the price
    InsufficientFunds,
    /// Item was already bought this session
    AlreadyOwned,
    /// No item with that id
    UnknownItem,
}

impl PurchaseCheck {
    /// Integer code shared with the host shell
    pub fn code(&self) -> i32 {
        match self {
            PurchaseCheck::Ok => 0,
            PurchaseCheck::InsufficientFunds => 1,
            PurchaseCheck::AlreadyOwned => 2,
            PurchaseCheck::UnknownItem => 3,
        }
    }

    /// Dialog title for a refused purchase
    pub fn message(&self) -> &'static str {
        match self {
            PurchaseCheck::Ok => "Confirm Purchase",
            PurchaseCheck::InsufficientFunds => "Insufficient Chips",
            PurchaseCheck::AlreadyOwned => "Already Owned",
            PurchaseCheck::UnknownItem => "Unknown Item",
        }
    }
}

/// Everything on sale
pub static SHOP_ITEMS: [ShopItem; 6] = [
    ShopItem {
        id: "double_draw",
        name: "Double Draw",
        description: "Draw 2 cards, play the higher one",
        price: 50,
        kind: ItemKind::Joker,
        rarity: Rarity::Rare,
        effect: "Next War: Draw 2, play higher",
    },
    ShopItem {
        id: "ace_high",
        name: "Ace Supremacy",
        description: "All your Aces beat any card",
        price: 75,
        kind: ItemKind::Joker,
        rarity: Rarity::Epic,
        effect: "Aces always win",
    },
    ShopItem {
        id: "tie_breaker",
        name: "Tie Breaker",
        description: "All ties go to you",
        price: 40,
        kind: ItemKind::Joker,
        rarity: Rarity::Rare,
        effect: "Win all ties",
    },
    ShopItem {
        id: "lucky_seven",
        name: "Lucky Seven",
        description: "All 7s become Aces",
        price: 30,
        kind: ItemKind::Card,
        rarity: Rarity::Common,
        effect: "7s \u{2192} Aces",
    },
    ShopItem {
        id: "mirror_card",
        name: "Mirror Card",
        description: "Copy opponent's card value +1",
        price: 100,
        kind: ItemKind::Joker,
        rarity: Rarity::Legendary,
        effect: "Copy + 1",
    },
    ShopItem {
        id: "chip_multiplier",
        name: "Chip Multiplier",
        description: "Double all chip rewards",
        price: 80,
        kind: ItemKind::Upgrade,
        rarity: Rarity::Epic,
        effect: "2x chip rewards",
    },
];

/// Session purchase tracker
#[derive(Debug, Clone, Default)]
pub struct Shop {
    purchased: BTreeSet<&'static str>,
}

impl Shop {
    /// Create a shop with nothing bought
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an item by id
    pub fn item(id: &str) -> Option<&'static ShopItem> {
        SHOP_ITEMS.iter().find(|item| item.id == id)
    }

    /// Whether an item was bought this session
    pub fn is_owned(&self, id: &str) -> bool {
        self.purchased.contains(id)
    }

    /// Ids bought so far, sorted
    pub fn purchased(&self) -> Vec<&'static str> {
        self.purchased.iter().copied().collect()
    }

    /// Check whether an item could be bought right now
    ///
    /// Funds are checked before ownership.
    pub fn check(&self, id: &str, ledger: &CurrencyLedger) -> PurchaseCheck {
        let Some(item) = Self::item(id) else {
            return PurchaseCheck::UnknownItem;
        };
        if !ledger.can_afford(item.price) {
            PurchaseCheck::InsufficientFunds
        } else if self.is_owned(item.id) {
            PurchaseCheck::AlreadyOwned
        } else {
            PurchaseCheck::Ok
        }
    }

    /// Buy an item, debiting the ledger when the guard passes
    pub fn purchase(&mut self, id: &str, ledger: &mut CurrencyLedger) -> PurchaseCheck {
        let check = self.check(id, ledger);
        match (check, Self::item(id)) {
            (PurchaseCheck::Ok, Some(item)) => {
                ledger.debit(item.price);
                self.purchased.insert(item.id);
                log::info!("Purchased {} for {} credits", item.name, item.price);
            }
            _ => log::info!("Purchase of {} refused: {:?}", id, check),
        }
        check
    }
}
