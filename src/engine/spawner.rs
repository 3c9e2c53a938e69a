//! Spawning encounters from ordinary chat messages.

use chrono::Utc;

use super::commands::Command;
use super::{messages, Engine, EventOutcome};
use crate::encounters::Encounter;
use crate::error::BotError;
use crate::rewards::{pick_name, roll_encounter_kind, roll_spawn, ActionKind};
use crate::transport::MessageReceived;

impl Engine {
    pub(crate) async fn on_message(&self, msg: &MessageReceived) -> Result<EventOutcome, BotError> {
        if msg.author_is_bot || msg.author_id == self.bot_user_id {
            return Ok(EventOutcome::Ignored);
        }
        tracing::debug!(author = %msg.author_id, channel = %msg.channel_id, "message received");

        if let Some(command) = Command::parse(&msg.text) {
            self.run_command(command, msg).await?;
            return Ok(EventOutcome::Command(command));
        }

        let (kind, name) = {
            let mut rng = self.rng.lock();
            if !roll_spawn(&self.config.spawn, &mut *rng) {
                return Ok(EventOutcome::NoSpawn);
            }
            let kind = roll_encounter_kind(&self.config.spawn, &mut *rng);
            let name = pick_name(self.config.spawn.names_for(kind), &mut *rng).to_string();
            (kind, name)
        };

        let prompt = messages::encounter_prompt(&msg.author_id, kind, &name, &self.config.actions);
        // Only track the encounter once the prompt exists.
        let message_id = self.transport.send_message(&msg.channel_id, &prompt).await?;

        let encounter = Encounter::new(
            message_id.clone(),
            msg.author_id.clone(),
            msg.channel_id.clone(),
            name,
            kind,
            Utc::now(),
        );
        if !self.registry.lock().open(encounter.clone()) {
            return Ok(EventOutcome::Ignored);
        }
        tracing::info!(
            encounter = %message_id,
            initiator = %msg.author_id,
            kind = ?kind,
            name = %encounter.name,
            "encounter spawned"
        );

        for action in ActionKind::ALL {
            let emoji = &self.config.actions.spec(action).emoji;
            if let Err(e) = self
                .transport
                .add_reaction(&msg.channel_id, &message_id, emoji)
                .await
            {
                tracing::warn!(encounter = %message_id, error = %e, "could not seed reaction");
            }
        }

        Ok(EventOutcome::Spawned(encounter))
    }
}
