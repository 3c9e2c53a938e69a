//! A transport that records outbound traffic instead of delivering it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{MessageId, Transport};
use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedReaction {
    pub channel_id: String,
    pub message_id: String,
    pub emoji: String,
}

/// Records every send and reaction. Message ids are `msg-1`, `msg-2`, ...
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    reactions: Mutex<Vec<AddedReaction>>,
    next_id: AtomicU64,
    fail_sends: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail.
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().last().map(|m| m.text.clone())
    }

    pub fn reactions(&self) -> Vec<AddedReaction> {
        self.reactions.lock().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
        self.reactions.lock().clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<MessageId, TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Send {
                channel_id: channel_id.to_string(),
                reason: "recording transport set to fail".to_string(),
            });
        }
        let id = format!("msg-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.sent.lock().push(SentMessage {
            id: id.clone(),
            channel_id: channel_id.to_string(),
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), TransportError> {
        self.reactions.lock().push(AddedReaction {
            channel_id: channel_id.to_string(),
            message_id: message_id.to_string(),
            emoji: emoji.to_string(),
        });
        Ok(())
    }
}
