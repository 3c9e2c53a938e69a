//! Resolving a player's reaction on an open encounter.

use super::{messages, Engine};
use crate::error::BotError;
use crate::rewards::{action_cost, roll_drop, ActionKind, DropOutcome};
use crate::transport::ReactionEvent;

/// How a reaction was handled. Rejections are ordinary outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not an action on an encounter: own reaction, unknown emoji, unknown or
    /// expired message.
    Ignored,
    /// Someone other than the initiator reacted.
    NotInitiator,
    /// The initiator already resolved an action here, whether or not the
    /// encounter has closed since.
    AlreadyReacted,
    /// The action costs more than the initiator holds. The encounter stays
    /// open.
    InsufficientFunds { cost: i64, balance: i64 },
    /// The action went through and the encounter is closed.
    Resolved {
        action: ActionKind,
        drop: DropOutcome,
        balance: i64,
    },
}

impl Engine {
    pub(crate) async fn resolve_reaction(&self, reaction: &ReactionEvent) -> Result<Resolution, BotError> {
        if reaction.user_id == self.bot_user_id {
            return Ok(Resolution::Ignored);
        }
        let Some(action) = self.config.actions.kind_for_emoji(&reaction.emoji) else {
            return Ok(Resolution::Ignored);
        };
        let encounter_id = reaction.message_id.as_str();
        let user_id = reaction.user_id.as_str();

        // Cheap check first so reactions on arbitrary messages never create a lock.
        let open = self.registry.lock().contains(encounter_id);
        if !open {
            return Ok(self.reaction_on_closed(encounter_id, user_id).await);
        }

        let _guard = self.encounter_locks.lock(encounter_id).await;

        let found = self.registry.lock().lookup(encounter_id).cloned();
        let Some(encounter) = found else {
            self.encounter_locks.forget(encounter_id);
            return Ok(self.reaction_on_closed(encounter_id, user_id).await);
        };
        let channel = encounter.channel_id.as_str();
        let currency = self.config.display.currency_symbol.as_str();

        if !encounter.is_initiator(user_id) {
            self.notify(channel, &messages::not_initiator(user_id)).await;
            return Ok(Resolution::NotInitiator);
        }

        if !self.registry.lock().mark_participated(encounter_id, user_id) {
            self.notify(channel, &messages::already_reacted(user_id)).await;
            return Ok(Resolution::AlreadyReacted);
        }

        let cost = action_cost(&self.config.actions, action);
        if !self.ledger.can_afford(user_id, cost) {
            return Ok(self.refuse_for_funds(encounter_id, user_id, channel, cost).await);
        }

        let drop = {
            let mut rng = self.rng.lock();
            roll_drop(&self.config, action, &mut *rng)
        };

        // Cost and reward land in one write: either both count or neither.
        let balance = match self.settle(user_id, cost, drop.amount()).await {
            Ok(Some(balance)) => balance,
            Ok(None) => {
                return Ok(self.refuse_for_funds(encounter_id, user_id, channel, cost).await);
            }
            Err(e) => {
                // A refused write does not use up the initiator's turn.
                self.registry.lock().release_participation(encounter_id, user_id);
                self.notify(channel, &messages::stash_unavailable(user_id)).await;
                return Err(e.into());
            }
        };

        self.close_encounter(encounter_id);
        tracing::info!(
            encounter = encounter_id,
            user = user_id,
            action = ?action,
            drop = ?drop,
            balance,
            "encounter resolved"
        );
        self.notify(
            channel,
            &messages::outcome(user_id, &encounter.name, &drop, balance, currency),
        )
        .await;

        Ok(Resolution::Resolved {
            action,
            drop,
            balance,
        })
    }

    async fn refuse_for_funds(
        &self,
        encounter_id: &str,
        user_id: &str,
        channel: &str,
        cost: i64,
    ) -> Resolution {
        // A refused action does not use up the initiator's turn.
        self.registry.lock().release_participation(encounter_id, user_id);
        let balance = self.ledger.get(user_id);
        tracing::debug!(encounter = encounter_id, user = user_id, cost, balance, "insufficient funds");
        let currency = self.config.display.currency_symbol.as_str();
        self.notify(channel, &messages::insufficient_funds(user_id, currency))
            .await;
        Resolution::InsufficientFunds { cost, balance }
    }

    /// A reaction on a message that is not an open encounter. Only the user who
    /// already resolved it hears about it.
    async fn reaction_on_closed(&self, encounter_id: &str, user_id: &str) -> Resolution {
        let channel = self
            .registry
            .lock()
            .resolved_channel(encounter_id, user_id)
            .map(str::to_string);
        match channel {
            Some(channel) => {
                self.notify(&channel, &messages::already_reacted(user_id)).await;
                Resolution::AlreadyReacted
            }
            None => Resolution::Ignored,
        }
    }

    fn close_encounter(&self, encounter_id: &str) {
        self.registry.lock().close(encounter_id);
        self.encounter_locks.forget(encounter_id);
    }
}
