//! Reward-table simulator for Monte Carlo analysis.
//!
//! Rolls millions of resolutions per action kind through the same
//! [`roll_drop`](crate::rewards::roll_drop) used in play to show:
//! - how often each action drops anything, stacks, or hits the jackpot
//! - the average payout per action, before and after its cost

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{ActionStats, SimReport};
pub use runner::run_simulation;
