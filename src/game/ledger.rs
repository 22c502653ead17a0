//! Currency ledger
//!
//! The session's single credit balance. Debits clamp at zero rather than
//! failing; callers that must not overspend check `can_afford` or use `spend`.

use serde::{Deserialize, Serialize};

/// Balance a fresh session starts with
pub const STARTING_BALANCE: u32 = 100;

/// In-memory credit balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyLedger {
    balance: u32,
}

impl Default for CurrencyLedger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl CurrencyLedger {
    /// Create a ledger with an opening balance
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    /// Current balance
    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Add credits
    pub fn credit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
        log::debug!("Ledger credit {} -> {}", amount, self.balance);
    }

    /// Remove credits, never going below zero
    pub fn debit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_sub(amount);
        log::debug!("Ledger debit {} -> {}", amount, self.balance);
    }

    /// Check whether the balance covers an amount
    pub fn can_afford(&self, amount: u32) -> bool {
        self.balance >= amount
    }

    /// Debit only if the balance covers the amount
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.can_afford(amount) {
            self.debit(amount);
            true
        } else {
            false
        }
    }
}
