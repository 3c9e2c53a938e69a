//! Event handling: spawning encounters, resolving actions, reporting.
//!
//! [`Engine`] owns everything with state (ledger, registry, RNG) and a handle
//! to the transport. It is shared behind an `Arc` and every event may be
//! handled on its own task.
//!
//! Locking:
//! - registry and RNG sit behind `parking_lot` mutexes that are never held
//!   across an `.await`;
//! - a whole resolution runs under the per-encounter lock from
//!   [`locks::KeyedLocks`], so two reactions on one encounter never
//!   interleave;
//! - ledger mutations are serialised inside [`Ledger`] itself and run on the
//!   blocking pool, since each one rewrites the store.

pub mod commands;
pub mod locks;
pub mod messages;
pub mod resolver;
pub mod spawner;

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::core::config::GameConfig;
use crate::encounters::{Encounter, EncounterRegistry};
use crate::error::{BotError, LedgerError};
use crate::ledger::Ledger;
use crate::transport::{Transport, TransportEvent};

pub use commands::Command;
pub use locks::KeyedLocks;
pub use resolver::Resolution;

/// What handling one event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing to do (bot author, removed reaction).
    Ignored,
    /// A reporting command was answered.
    Command(Command),
    /// The spawn roll missed.
    NoSpawn,
    Spawned(Encounter),
    Resolution(Resolution),
}

pub struct Engine {
    config: GameConfig,
    ledger: Arc<Ledger>,
    registry: Mutex<EncounterRegistry>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    transport: Arc<dyn Transport>,
    bot_user_id: String,
    encounter_locks: KeyedLocks,
}

impl Engine {
    pub fn new(
        config: GameConfig,
        ledger: Ledger,
        transport: Arc<dyn Transport>,
        bot_user_id: impl Into<String>,
    ) -> Self {
        let registry = EncounterRegistry::new(config.spawn.ttl());
        Self {
            config,
            ledger: Arc::new(ledger),
            registry: Mutex::new(registry),
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            transport,
            bot_user_id: bot_user_id.into(),
            encounter_locks: KeyedLocks::new(),
        }
    }

    /// Replace the random source, e.g. with a seeded or scripted one.
    pub fn with_rng(self, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
            ..self
        }
    }

    pub async fn handle_event(&self, event: TransportEvent) -> Result<EventOutcome, BotError> {
        match event {
            TransportEvent::MessageReceived(msg) => self.on_message(&msg).await,
            TransportEvent::ReactionAdded(reaction) => self
                .resolve_reaction(&reaction)
                .await
                .map(EventOutcome::Resolution),
            TransportEvent::ReactionRemoved(reaction) => {
                tracing::trace!(message = %reaction.message_id, user = %reaction.user_id, "reaction removed, ignoring");
                Ok(EventOutcome::Ignored)
            }
        }
    }

    /// Remove expired encounters. Returns how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        let expired = self.registry.lock().sweep_expired(Utc::now());
        for id in &expired {
            self.encounter_locks.forget(id);
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "swept expired encounters");
        }
        expired.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Snapshot of an open encounter.
    pub fn encounter(&self, id: &str) -> Option<Encounter> {
        self.registry.lock().lookup(id).cloned()
    }

    pub fn open_encounters(&self) -> usize {
        self.registry.lock().len()
    }

    /// [`Ledger::settle`] off the async workers.
    async fn settle(&self, user_id: &str, cost: i64, reward: i64) -> Result<Option<i64>, LedgerError> {
        let ledger = Arc::clone(&self.ledger);
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || ledger.settle(&user_id, cost, reward))
            .await
            .map_err(|e| LedgerError::Task(e.to_string()))?
    }

    /// Write the ledger out once more, e.g. on shutdown.
    pub async fn flush_ledger(&self) -> Result<(), LedgerError> {
        let ledger = Arc::clone(&self.ledger);
        tokio::task::spawn_blocking(move || ledger.flush())
            .await
            .map_err(|e| LedgerError::Task(e.to_string()))?
    }

    /// Send a notice whose delivery does not affect game state.
    async fn notify(&self, channel_id: &str, text: &str) {
        if let Err(e) = self.transport.send_message(channel_id, text).await {
            tracing::warn!(channel = channel_id, error = %e, "failed to deliver notice");
        }
    }
}
