//! Warlatro - naval card warfare core
//!
//! This library holds the game rules and session state for Warlatro, a
//! "War"-style card game: each round both sides draw a vessel, the stronger
//! one takes the round, and the first side to three round wins takes the
//! match. A presentation shell on Android drives the session through the JNI
//! bridge and renders whatever state it reads back.
//!
//! ## Pacing
//!
//! Round stages are separated by animation pauses. The `pacing` module keeps
//! those pauses on a virtual clock the shell ticks, so leaving the battle
//! screen cancels anything still queued.

pub mod android;
pub mod config;
pub mod game;
pub mod pacing;

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Mutex;

use crate::config::Settings;
use crate::game::collection::Collection;
use crate::game::draw::DrawSource;
use crate::game::ledger::CurrencyLedger;
use crate::game::navigation::{Navigator, Screen};
use crate::game::opponent::OpponentProfile;
use crate::game::shop::{PurchaseCheck, Shop};
use crate::game::state::{MatchEngine, MatchEvent, MatchState};

/// One play session
pub struct Warlatro {
    pub settings: Settings,
    ledger: CurrencyLedger,
    navigator: Navigator,
    pub shop: Shop,
    pub collection: Collection,
    selected_opponent: OpponentProfile,
    battle: Option<MatchEngine>,
}

impl Warlatro {
    /// Create a new session with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            ledger: CurrencyLedger::new(settings.starting_balance),
            navigator: Navigator::new(),
            shop: Shop::new(),
            collection: Collection::default(),
            selected_opponent: *OpponentProfile::default_opponent(),
            battle: None,
            settings,
        }
    }

    /// Screen the shell should show
    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    /// Current credit balance
    pub fn balance(&self) -> u32 {
        self.ledger.balance()
    }

    /// Opponent the next battle will be against
    pub fn selected_opponent(&self) -> &OpponentProfile {
        &self.selected_opponent
    }

    /// Active match, if on the battle screen
    pub fn battle(&self) -> Option<&MatchEngine> {
        self.battle.as_ref()
    }

    /// Mutable access to the active match
    pub fn battle_mut(&mut self) -> Option<&mut MatchEngine> {
        self.battle.as_mut()
    }

    /// Switch screens
    ///
    /// Entering the battle screen starts a fresh match against the selected
    /// opponent; leaving it aborts the match so no queued stage fires later.
    pub fn navigate(&mut self, to: Screen) -> bool {
        let from = self.navigator.current();
        if !self.navigator.navigate(to) {
            return false;
        }

        if from == Screen::Battle {
            if let Some(engine) = self.battle.take() {
                engine.abort();
            }
        }
        if to == Screen::Battle {
            log::info!("Engaging {}", self.selected_opponent.name);
            self.battle = Some(MatchEngine::new(self.selected_opponent, &self.settings));
        }
        true
    }

    /// Pick an opponent on the map; locked or unknown ids are refused
    pub fn select_opponent(&mut self, id: u32) -> bool {
        match OpponentProfile::by_id(id) {
            Some(profile) if profile.unlocked => {
                self.selected_opponent = *profile;
                true
            }
            Some(profile) => {
                log::info!("{} is locked", profile.name);
                false
            }
            None => false,
        }
    }

    /// Start a round in the active match
    pub fn start_round(&mut self) -> Option<MatchEvent> {
        self.battle.as_mut()?.start_round()
    }

    /// Tick the match clock
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<MatchEvent> {
        match self.battle.as_mut() {
            Some(engine) => engine.advance(elapsed_ms, &mut self.ledger),
            None => Vec::new(),
        }
    }

    /// Run every queued stage of the active match immediately
    pub fn flush(&mut self) -> Vec<MatchEvent> {
        match self.battle.as_mut() {
            Some(engine) => engine.flush(&mut self.ledger),
            None => Vec::new(),
        }
    }

    /// Start the active match over
    pub fn reset_match(&mut self) -> bool {
        match self.battle.as_mut() {
            Some(engine) => {
                engine.reset();
                true
            }
            None => false,
        }
    }

    /// Swap the draw source of the active match
    pub fn set_draw_source(&mut self, draw: Box<dyn DrawSource>) -> bool {
        match self.battle.as_mut() {
            Some(engine) => {
                engine.set_draw_source(draw);
                true
            }
            None => false,
        }
    }

    /// Try to buy a shop item
    pub fn purchase(&mut self, item_id: &str) -> PurchaseCheck {
        self.shop.purchase(item_id, &mut self.ledger)
    }

    /// Serializable view of the session for the shell
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            screen: self.navigator.current(),
            balance: self.ledger.balance(),
            opponent: self.selected_opponent,
            battle: self.battle.as_ref().map(|engine| engine.state().clone()),
            wager: self.settings.wager,
            purchased: self.shop.purchased(),
            collection_owned: Collection::owned_count(),
            collection_total: Collection::total(),
        }
    }
}

/// Session state as reported to the shell
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub balance: u32,
    pub opponent: OpponentProfile,
    pub battle: Option<MatchState>,
    pub wager: u32,
    pub purchased: Vec<&'static str>,
    pub collection_owned: usize,
    pub collection_total: usize,
}

/// Global session for JNI access
static WARLATRO_INSTANCE: OnceCell<Mutex<Warlatro>> = OnceCell::new();

/// Initialize the global session
///
/// Returns false if a session already exists.
pub fn init_warlatro(settings: Settings) -> bool {
    WARLATRO_INSTANCE.set(Mutex::new(Warlatro::new(settings))).is_ok()
}

/// Get a reference to the global session
pub fn get_warlatro() -> Option<&'static Mutex<Warlatro>> {
    WARLATRO_INSTANCE.get()
}
