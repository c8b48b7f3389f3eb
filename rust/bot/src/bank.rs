use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Balance every player starts with the first time they are seen.
pub const STARTING_BALANCE: u32 = 150;
/// Coins granted per fountain claim.
pub const FOUNTAIN_GRANT: u32 = 50;
/// Cooldown between fountain claims.
pub const FOUNTAIN_COOLDOWN_SECS: i64 = 3600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("insufficient balance: have {balance}, requested {requested}")]
    InsufficientBalance { balance: u32, requested: u32 },
    #[error("fountain cooldown: {wait_secs}s remaining")]
    FountainCooldown { wait_secs: i64 },
}

/// Storage seam for balances and fountain claim stamps. The bot only ever
/// talks to this trait; wiring an external key-value backend behind it is
/// out of scope here, so the in-memory [`MemoryStore`] is the only
/// implementation shipped.
pub trait BalanceStore: Send + Sync {
    fn balance(&self, player_id: &str) -> Option<u32>;
    fn set_balance(&self, player_id: &str, amount: u32);
    fn last_fountain_claim(&self, player_id: &str) -> Option<DateTime<Utc>>;
    fn set_last_fountain_claim(&self, player_id: &str, at: DateTime<Utc>);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    balances: Mutex<HashMap<String, u32>>,
    claims: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BalanceStore for MemoryStore {
    fn balance(&self, player_id: &str) -> Option<u32> {
        let guard = match self.balances.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(player_id).copied()
    }

    fn set_balance(&self, player_id: &str, amount: u32) {
        let mut guard = match self.balances.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(player_id.to_string(), amount);
    }

    fn last_fountain_claim(&self, player_id: &str) -> Option<DateTime<Utc>> {
        let guard = match self.claims.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(player_id).copied()
    }

    fn set_last_fountain_claim(&self, player_id: &str, at: DateTime<Utc>) {
        let mut guard = match self.claims.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(player_id.to_string(), at);
    }
}

/// Economy policy: first-seen players get the starting balance, bets are
/// debited up front, and the fountain grants a fixed amount on an hourly
/// cooldown.
pub struct Bank {
    store: Arc<dyn BalanceStore>,
}

impl Bank {
    pub fn new(store: Arc<dyn BalanceStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current balance, initializing an unseen player to the starting
    /// amount first.
    pub fn balance(&self, player_id: &str) -> u32 {
        match self.store.balance(player_id) {
            Some(balance) => balance,
            None => {
                self.store.set_balance(player_id, STARTING_BALANCE);
                STARTING_BALANCE
            }
        }
    }

    pub fn debit(&self, player_id: &str, amount: u32) -> Result<u32, BankError> {
        let balance = self.balance(player_id);
        if amount > balance {
            return Err(BankError::InsufficientBalance {
                balance,
                requested: amount,
            });
        }
        let updated = balance - amount;
        self.store.set_balance(player_id, updated);
        Ok(updated)
    }

    pub fn credit(&self, player_id: &str, amount: u32) -> u32 {
        let updated = self.balance(player_id).saturating_add(amount);
        self.store.set_balance(player_id, updated);
        updated
    }

    /// Grants the fountain amount, or reports how long the player still has
    /// to wait.
    pub fn claim_fountain(&self, player_id: &str) -> Result<u32, BankError> {
        self.claim_fountain_at(player_id, Utc::now())
    }

    /// Clock-injected variant of [`Bank::claim_fountain`].
    pub fn claim_fountain_at(
        &self,
        player_id: &str,
        now: DateTime<Utc>,
    ) -> Result<u32, BankError> {
        if let Some(last) = self.store.last_fountain_claim(player_id) {
            let since = now.signed_duration_since(last);
            let cooldown = Duration::seconds(FOUNTAIN_COOLDOWN_SECS);
            if since < cooldown {
                return Err(BankError::FountainCooldown {
                    wait_secs: (cooldown - since).num_seconds(),
                });
            }
        }
        let updated = self.credit(player_id, FOUNTAIN_GRANT);
        self.store.set_last_fountain_claim(player_id, now);
        tracing::debug!(player_id = %player_id, balance = updated, "fountain claimed");
        Ok(updated)
    }
}
