//! Game state and logic module
//!
//! This module contains the match engine and everything it reads: the fleet
//! catalog, draw sources, the round resolver, opponents, the currency ledger,
//! plus the shop, collection and screen navigation the shell drives.

pub mod catalog;
pub mod collection;
pub mod draw;
pub mod ledger;
pub mod navigation;
pub mod opponent;
pub mod resolver;
pub mod shop;
pub mod state;

pub use catalog::{RankClass, RankedItem, FLEET};
pub use collection::{Collection, CollectionTab};
pub use draw::{DrawSource, RandomDraw, ScriptedDraw};
pub use ledger::CurrencyLedger;
pub use navigation::{Navigator, Screen};
pub use opponent::{OpponentProfile, ADMIRALS};
pub use resolver::{resolve, RoundOutcome, RuleModifier};
pub use shop::{PurchaseCheck, Shop, ShopItem};
pub use state::{MatchEngine, MatchEvent, MatchOutcome, MatchPhase, MatchState};
