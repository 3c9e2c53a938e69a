//! Probability tables for spawning and drops.
//!
//! Every roll takes one uniform `[0, 1)` draw from the caller's RNG. Within a
//! resolution the draws happen in a fixed order (jackpot, drop, stack, stack
//! size) and that order is part of the odds.

use rand::Rng;

use super::types::{ActionKind, DropOutcome, EncounterKind};
use crate::core::config::{ActionSpec, ActionTable, GameConfig, RewardConfig, SpawnConfig};

/// Whether an ordinary message spawns an encounter.
pub fn roll_spawn(spawn: &SpawnConfig, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < spawn.spawn_chance
}

/// Minor with `minor_chance`, Major with `major_chance`. Any shortfall in the
/// two bands falls back to Minor.
pub fn roll_encounter_kind(spawn: &SpawnConfig, rng: &mut impl Rng) -> EncounterKind {
    let roll = rng.gen::<f64>();
    if roll < spawn.minor_chance {
        EncounterKind::Minor
    } else if roll < spawn.minor_chance + spawn.major_chance {
        EncounterKind::Major
    } else {
        EncounterKind::Minor
    }
}

/// Uniform pick from a name pool.
pub fn pick_name<'a>(pool: &'a [String], rng: &mut impl Rng) -> &'a str {
    let roll = rng.gen::<f64>();
    let idx = ((roll * pool.len() as f64) as usize).min(pool.len().saturating_sub(1));
    pool.get(idx).map(String::as_str).unwrap_or("enemy")
}

/// Weighted stack size. With the default table:
/// `[0, 0.1) -> 5`, `[0.1, 0.3) -> 4`, `[0.3, 0.6) -> 3`, `[0.6, 1) -> 2`.
pub fn roll_stack_size(rewards: &RewardConfig, rng: &mut impl Rng) -> i64 {
    let roll = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for entry in &rewards.stack_sizes {
        cumulative += entry.weight;
        if roll < cumulative {
            return entry.size;
        }
    }
    rewards.stack_sizes.last().map(|s| s.size).unwrap_or(1)
}

/// Jackpot check for one action. Actions with no jackpot chance consume no
/// draw.
pub fn roll_jackpot(spec: &ActionSpec, rng: &mut impl Rng) -> bool {
    if spec.jackpot_chance <= 0.0 {
        return false;
    }
    rng.gen::<f64>() < spec.jackpot_chance
}

pub fn reward_multiplier(actions: &ActionTable, kind: ActionKind) -> i64 {
    actions.spec(kind).multiplier
}

pub fn action_cost(actions: &ActionTable, kind: ActionKind) -> i64 {
    actions.spec(kind).cost
}

/// Roll the reward for a resolved action.
pub fn roll_drop(config: &GameConfig, kind: ActionKind, rng: &mut impl Rng) -> DropOutcome {
    let spec = config.actions.spec(kind);
    let multiplier = spec.multiplier;

    if roll_jackpot(spec, rng) {
        return DropOutcome::Jackpot {
            amount: config.rewards.jackpot_base * multiplier,
        };
    }

    if rng.gen::<f64>() >= config.rewards.drop_chance {
        return DropOutcome::Nothing;
    }

    if rng.gen::<f64>() < config.rewards.stack_chance {
        let size = roll_stack_size(&config.rewards, rng);
        DropOutcome::Stack {
            size,
            amount: size * multiplier,
        }
    } else {
        DropOutcome::Single { amount: multiplier }
    }
}
