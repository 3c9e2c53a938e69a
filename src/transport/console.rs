//! Line-oriented console transport for running the game locally.
//!
//! Input, one event per line:
//!
//! ```text
//! say <channel> <author> <text...>
//! botsay <channel> <author> <text...>
//! react <message id> <user> <emoji>
//! unreact <message id> <user> <emoji>
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Outbound messages are
//! printed as `[#channel] (message id) text`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};

use super::{MessageId, MessageReceived, ReactionEvent, Transport, TransportEvent};
use crate::error::TransportError;

pub struct ConsoleTransport {
    out: Mutex<tokio::io::Stdout>,
    next_id: AtomicU64,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
            next_id: AtomicU64::new(0),
        }
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<MessageId, TransportError> {
        let id = format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.write_line(&format!("[#{channel_id}] ({id}) {text}"))
            .await
            .map_err(|e| TransportError::Send {
                channel_id: channel_id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(id)
    }

    async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), TransportError> {
        self.write_line(&format!("[#{channel_id}] ({message_id}) +{emoji}"))
            .await
            .map_err(|e| TransportError::React {
                message_id: message_id.to_string(),
                emoji: emoji.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Parse one console line into an event.
pub fn parse_line(line: &str) -> Option<TransportEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (verb, rest) = line.split_once(char::is_whitespace)?;
    match verb {
        "say" | "botsay" => {
            let mut parts = rest.trim_start().splitn(3, char::is_whitespace);
            let channel_id = parts.next()?.to_string();
            let author_id = parts.next()?.to_string();
            let text = parts.next().unwrap_or("").trim().to_string();
            Some(TransportEvent::MessageReceived(MessageReceived {
                author_id,
                author_is_bot: verb == "botsay",
                channel_id,
                text,
            }))
        }
        "react" | "unreact" => {
            let mut parts = rest.split_whitespace();
            let reaction = ReactionEvent {
                message_id: parts.next()?.to_string(),
                user_id: parts.next()?.to_string(),
                emoji: parts.next()?.to_string(),
            };
            if verb == "react" {
                Some(TransportEvent::ReactionAdded(reaction))
            } else {
                Some(TransportEvent::ReactionRemoved(reaction))
            }
        }
        _ => None,
    }
}

/// Forward parsed events from `input` until it ends or the receiver is gone.
pub async fn pump_events<R>(input: R, events: mpsc::Sender<TransportEvent>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Some(event) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            None if !line.trim().is_empty() && !line.trim_start().starts_with('#') => {
                tracing::warn!(line = %line, "unrecognised console input");
            }
            None => {}
        }
    }
    Ok(())
}
