//! The chat platform boundary.
//!
//! The game only sees three inbound events and two outbound capabilities.
//! Anything platform specific (gateways, sessions, formatting) lives behind
//! [`Transport`].

pub mod console;
pub mod recording;

use async_trait::async_trait;

use crate::error::TransportError;

pub use console::ConsoleTransport;
pub use recording::RecordingTransport;

/// Platform id of a sent message.
pub type MessageId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceived {
    pub author_id: String,
    pub author_is_bot: bool,
    pub channel_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub message_id: String,
    pub user_id: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    MessageReceived(MessageReceived),
    ReactionAdded(ReactionEvent),
    /// Observed but never acted on: removing a reaction does not undo it.
    ReactionRemoved(ReactionEvent),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `text` to a channel, returning the new message's id.
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<MessageId, TransportError>;

    /// Attach a reaction to one of our messages.
    async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), TransportError>;
}
