//! Brinebot - chance-based encounter minigame for chat platforms.
//!
//! Messages occasionally spawn an encounter; the player who triggered it can
//! react with one of three actions to win currency tracked in a persistent
//! ledger. The chat platform itself sits behind [`transport::Transport`].

pub mod core;
pub mod encounters;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod rewards;
pub mod simulator;
pub mod transport;
pub mod utils;

pub use crate::core::GameConfig;
pub use engine::{Engine, EventOutcome, Resolution};
pub use ledger::Ledger;
