//! Reward tables: encounter tiers, drops, stacks and jackpots.

pub mod tables;
pub mod testing;
pub mod types;

pub use tables::{
    action_cost, pick_name, reward_multiplier, roll_drop, roll_encounter_kind, roll_jackpot,
    roll_spawn, roll_stack_size,
};
pub use types::{ActionKind, DropOutcome, EncounterKind};
