//! Read-only reporting commands.

use super::messages;
use super::Engine;
use crate::core::constants::{LEADERBOARD_COMMAND, STASH_COMMAND};
use crate::error::BotError;
use crate::transport::MessageReceived;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Report the caller's balance.
    Stash,
    /// Report the top balances.
    Leaderboard,
}

impl Command {
    /// Case-sensitive prefix match, so `!stash please` still counts.
    pub fn parse(text: &str) -> Option<Self> {
        if text.starts_with(STASH_COMMAND) {
            Some(Command::Stash)
        } else if text.starts_with(LEADERBOARD_COMMAND) {
            Some(Command::Leaderboard)
        } else {
            None
        }
    }
}

impl Engine {
    pub(crate) async fn run_command(
        &self,
        command: Command,
        msg: &MessageReceived,
    ) -> Result<(), BotError> {
        let currency = &self.config.display.currency_symbol;
        let text = match command {
            Command::Stash => {
                messages::stash(&msg.author_id, self.ledger.get(&msg.author_id), currency)
            }
            Command::Leaderboard => messages::leaderboard(&self.leaderboard(), currency),
        };
        self.transport.send_message(&msg.channel_id, &text).await?;
        Ok(())
    }

    /// Ranked balances as shown by `!leaderboard`.
    pub fn leaderboard(&self) -> Vec<(String, i64)> {
        self.ledger.leaderboard(self.config.display.leaderboard_size)
    }
}
