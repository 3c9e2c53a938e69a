//! In-memory store of open encounters.
//!
//! Entries live until they are closed or, when a TTL is configured, until
//! they expire. Expired entries are evicted lazily on lookup and in bulk by
//! [`EncounterRegistry::sweep_expired`].
//!
//! Closing an encounter leaves a small record of who acted on it, so a late
//! second reaction can be told it was already used rather than ignored.
//! Those records are swept with the same TTL and capped in number, oldest
//! dropped first.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};

use super::types::Encounter;
use crate::core::constants::CLOSED_ENCOUNTER_LIMIT;

#[derive(Debug, Clone)]
struct ClosedEncounter {
    channel_id: String,
    participants: HashSet<String>,
    closed_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct EncounterRegistry {
    open: HashMap<String, Encounter>,
    closed: HashMap<String, ClosedEncounter>,
    /// Closed ids, oldest first.
    closed_order: VecDeque<String>,
    closed_limit: usize,
    ttl: Option<chrono::Duration>,
}

impl EncounterRegistry {
    pub fn new(ttl: Option<chrono::Duration>) -> Self {
        Self {
            open: HashMap::new(),
            closed: HashMap::new(),
            closed_order: VecDeque::new(),
            closed_limit: CLOSED_ENCOUNTER_LIMIT,
            ttl,
        }
    }

    pub fn with_closed_limit(mut self, limit: usize) -> Self {
        self.closed_limit = limit;
        self
    }

    /// Track a new encounter. Returns `false` and changes nothing if the id is
    /// already open.
    pub fn open(&mut self, encounter: Encounter) -> bool {
        if self.open.contains_key(&encounter.id) {
            tracing::warn!(encounter = %encounter.id, "encounter already open, ignoring");
            return false;
        }
        self.open.insert(encounter.id.clone(), encounter);
        true
    }

    pub fn lookup(&mut self, id: &str) -> Option<&Encounter> {
        self.lookup_at(id, Utc::now())
    }

    /// Lookup as of `now`; an expired entry is removed and reported absent.
    pub fn lookup_at(&mut self, id: &str, now: DateTime<Utc>) -> Option<&Encounter> {
        let expired = self.open.get(id)?.is_expired(self.ttl, now);
        if expired {
            self.open.remove(id);
            tracing::debug!(encounter = id, "encounter expired");
            return None;
        }
        self.open.get(id)
    }

    /// Record that `user_id` acted on the encounter. Returns `false` if they
    /// already had, or if the encounter is not open.
    pub fn mark_participated(&mut self, id: &str, user_id: &str) -> bool {
        match self.open.get_mut(id) {
            Some(encounter) => encounter.participants.insert(user_id.to_string()),
            None => false,
        }
    }

    pub fn has_participated(&self, id: &str, user_id: &str) -> bool {
        self.open
            .get(id)
            .is_some_and(|e| e.participants.contains(user_id))
    }

    /// Undo a participation mark whose action was refused.
    pub fn release_participation(&mut self, id: &str, user_id: &str) {
        if let Some(encounter) = self.open.get_mut(id) {
            encounter.participants.remove(user_id);
        }
    }

    pub fn close(&mut self, id: &str) -> Option<Encounter> {
        self.close_at(id, Utc::now())
    }

    pub fn close_at(&mut self, id: &str, now: DateTime<Utc>) -> Option<Encounter> {
        let encounter = self.open.remove(id)?;
        let record = ClosedEncounter {
            channel_id: encounter.channel_id.clone(),
            participants: encounter.participants.clone(),
            closed_at: now,
        };
        if self.closed.insert(id.to_string(), record).is_some() {
            self.closed_order.retain(|closed_id| closed_id != id);
        }
        self.closed_order.push_back(id.to_string());
        while self.closed.len() > self.closed_limit {
            let Some(oldest) = self.closed_order.pop_front() else {
                break;
            };
            self.closed.remove(&oldest);
        }
        Some(encounter)
    }

    /// Whether `user_id` acted on the now-closed encounter `id`.
    pub fn was_resolved_by(&self, id: &str, user_id: &str) -> bool {
        self.resolved_channel(id, user_id).is_some()
    }

    /// Channel of the closed encounter `id`, if `user_id` acted on it.
    pub fn resolved_channel(&self, id: &str, user_id: &str) -> Option<&str> {
        self.closed
            .get(id)
            .filter(|c| c.participants.contains(user_id))
            .map(|c| c.channel_id.as_str())
    }

    /// Drop every expired encounter and closed-encounter record. Returns the
    /// ids of the open encounters that expired.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let Some(ttl) = self.ttl else {
            return Vec::new();
        };
        let expired: Vec<String> = self
            .open
            .values()
            .filter(|e| e.is_expired(Some(ttl), now))
            .map(|e| e.id.clone())
            .collect();
        for id in &expired {
            self.open.remove(id);
        }
        self.closed.retain(|_, c| now - c.closed_at < ttl);
        let closed = &self.closed;
        self.closed_order.retain(|id| closed.contains_key(id));
        expired
    }

    pub fn contains(&self, id: &str) -> bool {
        self.open.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
