//! Error types shared across the bot.
//!
//! Policy rejections (not the initiator, already reacted, insufficient funds)
//! are ordinary outcomes and never show up here.

use thiserror::Error;

/// Failure to load or persist the ledger document.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Reading or writing the backing file failed.
    #[error("ledger io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing document exists but does not parse as a ledger.
    #[error("ledger document is corrupt: {0}")]
    Corrupt(String),

    /// The store refused the write (used by in-memory stores).
    #[error("ledger store rejected write: {0}")]
    WriteRejected(String),

    /// The blocking task running the mutation died before finishing.
    #[error("ledger task failed: {0}")]
    Task(String),
}

/// Failure reported by the chat transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("send to channel {channel_id} failed: {reason}")]
    Send { channel_id: String, reason: String },

    #[error("could not add reaction {emoji} to message {message_id}: {reason}")]
    React {
        message_id: String,
        emoji: String,
        reason: String,
    },

    #[error("transport closed")]
    Closed,
}

/// Invalid or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level error for a single handled event.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
