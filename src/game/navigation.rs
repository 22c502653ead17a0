//! Screen navigation
//!
//! Tracks which screen the shell should show and which moves between screens
//! are allowed.

use serde::{Deserialize, Serialize};

/// A top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Main menu
    Menu,
    /// Tactical map (opponent selection)
    Map,
    /// A match in progress
    Battle,
    /// Armory shop
    Shop,
    /// Fleet status collection
    Collection,
}

impl Screen {
    /// Decode a screen code sent by the host shell
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Screen::Menu),
            1 => Some(Screen::Map),
            2 => Some(Screen::Battle),
            3 => Some(Screen::Shop),
            4 => Some(Screen::Collection),
            _ => None,
        }
    }

    /// Code shared with the host shell
    pub fn code(&self) -> i32 {
        match self {
            Screen::Menu => 0,
            Screen::Map => 1,
            Screen::Battle => 2,
            Screen::Shop => 3,
            Screen::Collection => 4,
        }
    }

    /// Check whether a direct move to `to` is allowed
    pub fn can_navigate_to(&self, to: Screen) -> bool {
        matches!(
            (self, to),
            (Screen::Menu, Screen::Map | Screen::Shop | Screen::Collection)
                | (Screen::Map, Screen::Menu | Screen::Battle)
                | (Screen::Battle | Screen::Shop | Screen::Collection, Screen::Menu)
        )
    }
}

/// Current screen plus history
#[derive(Debug, Clone, Serialize)]
pub struct Navigator {
    current: Screen,
    previous: Screen,
    /// Navigations performed this session
    transitions: u32,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Screen::Menu,
            previous: Screen::Menu,
            transitions: 0,
        }
    }
}

impl Navigator {
    /// Start on the main menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen being shown
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Screen shown before the current one
    pub fn previous(&self) -> Screen {
        self.previous
    }

    /// Number of successful navigations
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Move to another screen if the move is allowed
    pub fn navigate(&mut self, to: Screen) -> bool {
        if !self.current.can_navigate_to(to) {
            log::warn!("Navigation {:?} -> {:?} not allowed", self.current, to);
            return false;
        }
        log::debug!("Navigate {:?} -> {:?}", self.current, to);
        self.previous = self.current;
        self.current = to;
        self.transitions += 1;
        true
    }
}
