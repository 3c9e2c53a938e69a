use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::rewards::types::EncounterKind;

/// An open encounter, keyed by the id of the prompt message that announced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    pub id: String,
    pub initiator_id: String,
    pub channel_id: String,
    pub name: String,
    pub kind: EncounterKind,
    pub participants: HashSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Encounter {
    pub fn new(
        id: impl Into<String>,
        initiator_id: impl Into<String>,
        channel_id: impl Into<String>,
        name: impl Into<String>,
        kind: EncounterKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            initiator_id: initiator_id.into(),
            channel_id: channel_id.into(),
            name: name.into(),
            kind,
            participants: HashSet::new(),
            created_at,
        }
    }

    pub fn is_initiator(&self, user_id: &str) -> bool {
        self.initiator_id == user_id
    }

    pub fn is_expired(&self, ttl: Option<chrono::Duration>, now: DateTime<Utc>) -> bool {
        match ttl {
            Some(ttl) => now - self.created_at >= ttl,
            None => false,
        }
    }
}
