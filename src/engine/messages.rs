//! Player-facing text.

use crate::core::config::ActionTable;
use crate::rewards::types::{DropOutcome, EncounterKind};

pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

pub fn encounter_prompt(
    initiator_id: &str,
    kind: EncounterKind,
    name: &str,
    actions: &ActionTable,
) -> String {
    let who = mention(initiator_id);
    if kind.offers_costed_actions() {
        format!(
            "{who}, you encounter {name}! React with {} to attack, {} for a strong attack, or {} for an ultimate attack.",
            actions.basic.emoji, actions.strong.emoji, actions.ultimate.emoji
        )
    } else {
        format!(
            "{who}, you encounter a {name}! React with {} to attack.",
            actions.basic.emoji
        )
    }
}

pub fn not_initiator(user_id: &str) -> String {
    format!(
        "{}, only the person who started the encounter can interact with it.",
        mention(user_id)
    )
}

pub fn already_reacted(user_id: &str) -> String {
    format!("{}, you have already reacted to this encounter.", mention(user_id))
}

pub fn insufficient_funds(user_id: &str, currency: &str) -> String {
    format!(
        "{}, you don't have enough {currency} to perform this attack.",
        mention(user_id)
    )
}

pub fn stash_unavailable(user_id: &str) -> String {
    format!(
        "{}, your stash could not be updated right now. Nothing was spent or won, so try again.",
        mention(user_id)
    )
}

/// Result line for a resolved action.
pub fn outcome(
    user_id: &str,
    enemy: &str,
    drop: &DropOutcome,
    balance: i64,
    currency: &str,
) -> String {
    let who = mention(user_id);
    match drop {
        DropOutcome::Jackpot { amount } => format!(
            "{who}, wowee that's a big boy! You found {amount} {currency} from your attack. You now have {balance} {currency}."
        ),
        DropOutcome::Stack { amount, .. } => format!(
            "{who}, you defeated the {enemy} and found a stack of {amount} {currency}! You now have {balance} {currency}."
        ),
        DropOutcome::Single { amount } => format!(
            "{who}, you defeated the {enemy} and found {amount} {currency}! You now have {balance} {currency}."
        ),
        DropOutcome::Nothing => {
            format!("{who}, you fought bravely but found no {currency}.")
        }
    }
}

pub fn stash(user_id: &str, balance: i64, currency: &str) -> String {
    format!("{}, you have {balance} {currency}.", mention(user_id))
}

pub fn leaderboard(rows: &[(String, i64)], currency: &str) -> String {
    if rows.is_empty() {
        return format!("**Leaderboard:**\nNo one has found any {currency} yet.");
    }
    let lines: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, (user, balance))| {
            format!("#{} {}: {balance} {currency}", i + 1, mention(user))
        })
        .collect();
    format!("**Leaderboard:**\n{}", lines.join("\n"))
}
