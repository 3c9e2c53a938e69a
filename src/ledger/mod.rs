//! Durable per-user currency balances.
//!
//! The ledger keeps every balance in memory and rewrites the whole document
//! through its [`LedgerStore`] on each mutation. A mutation only counts once
//! the write succeeded: on a failed write the in-memory change is rolled back
//! and the error returned.
//!
//! All mutations take the same lock for the read-modify-persist cycle, so
//! concurrent updates for a user can never lose each other. Mutations block
//! on the store; async callers run them through `spawn_blocking`.

pub mod store;

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::LedgerError;
pub use store::{Entries, JsonFileStore, LedgerStore, MemoryStore};

#[derive(Debug, Default)]
struct Balances {
    entries: Entries,
    index: HashMap<String, usize>,
}

impl Balances {
    fn from_entries(entries: Entries) -> Self {
        let mut balances = Self::default();
        for (user, balance) in entries {
            match balances.index.get(&user) {
                Some(&i) => balances.entries[i].1 = balance,
                None => {
                    balances.index.insert(user.clone(), balances.entries.len());
                    balances.entries.push((user, balance));
                }
            }
        }
        balances
    }

    fn get(&self, user_id: &str) -> i64 {
        self.index
            .get(user_id)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }
}

pub struct Ledger {
    balances: Mutex<Balances>,
    store: Box<dyn LedgerStore>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("users", &self.balances.lock().entries.len())
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Open a ledger over `store`. A store that cannot be read yields an
    /// empty ledger; the next successful write replaces the bad document.
    pub fn open(store: impl LedgerStore + 'static) -> Self {
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "could not load ledger, starting empty");
                Vec::new()
            }
        };
        tracing::info!(users = entries.len(), "ledger loaded");
        Self {
            balances: Mutex::new(Balances::from_entries(entries)),
            store: Box::new(store),
        }
    }

    /// Stored balance, or 0 for unknown users.
    pub fn get(&self, user_id: &str) -> i64 {
        self.balances.lock().get(user_id)
    }

    pub fn can_afford(&self, user_id: &str, cost: i64) -> bool {
        self.get(user_id) >= cost
    }

    /// Apply `delta` and persist. Returns the new balance.
    pub fn add(&self, user_id: &str, delta: i64) -> Result<i64, LedgerError> {
        let mut balances = self.balances.lock();
        self.apply_locked(&mut balances, user_id, delta)
    }

    /// Charge `cost` and credit `reward` as one persisted mutation.
    ///
    /// Returns `Ok(None)` without touching anything when the balance is
    /// short of `cost`. A net change of zero is not written.
    pub fn settle(&self, user_id: &str, cost: i64, reward: i64) -> Result<Option<i64>, LedgerError> {
        let mut balances = self.balances.lock();
        let balance = balances.get(user_id);
        if balance < cost {
            return Ok(None);
        }
        let delta = reward - cost;
        if delta == 0 {
            return Ok(Some(balance));
        }
        self.apply_locked(&mut balances, user_id, delta).map(Some)
    }

    /// Top `limit` users by balance, highest first. Ties keep insertion order.
    pub fn leaderboard(&self, limit: usize) -> Vec<(String, i64)> {
        let mut ranked = self.balances.lock().entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Persist the current snapshot.
    pub fn flush(&self) -> Result<(), LedgerError> {
        let balances = self.balances.lock();
        self.store.persist(&balances.entries)
    }

    pub fn len(&self) -> usize {
        self.balances.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn apply_locked(
        &self,
        balances: &mut Balances,
        user_id: &str,
        delta: i64,
    ) -> Result<i64, LedgerError> {
        let (idx, inserted) = match balances.index.get(user_id) {
            Some(&i) => (i, false),
            None => {
                let i = balances.entries.len();
                balances.index.insert(user_id.to_string(), i);
                balances.entries.push((user_id.to_string(), 0));
                (i, true)
            }
        };

        let previous = balances.entries[idx].1;
        let updated = previous.saturating_add(delta);
        balances.entries[idx].1 = updated;

        if let Err(e) = self.store.persist(&balances.entries) {
            if inserted {
                balances.entries.pop();
                balances.index.remove(user_id);
            } else {
                balances.entries[idx].1 = previous;
            }
            tracing::error!(user = user_id, delta, error = %e, "ledger write failed, change rolled back");
            return Err(e);
        }

        tracing::debug!(user = user_id, delta, balance = updated, "ledger updated");
        Ok(updated)
    }
}
