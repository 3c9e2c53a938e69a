//! Simulation runner.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SimConfig;
use super::report::{ActionStats, SimReport};
use crate::core::config::GameConfig;
use crate::rewards::{action_cost, roll_drop, DropOutcome};

/// Run the simulation and return a report.
pub fn run_simulation(config: &SimConfig, game: &GameConfig) -> SimReport {
    let mut rows = Vec::with_capacity(config.actions.len());

    for (idx, &action) in config.actions.iter().enumerate() {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(idx as u64)),
            None => StdRng::from_entropy(),
        };

        let mut stats = ActionStats::new(action, action_cost(&game.actions, action));
        for _ in 0..config.trials {
            let drop = roll_drop(game, action, &mut rng);
            stats.record(&drop);
        }

        if config.verbosity >= 2 {
            println!(
                "{:?}: {} trials, {} drops, {} jackpots",
                action, stats.trials, stats.drops, stats.jackpots
            );
        }
        rows.push(stats);
    }

    SimReport {
        trials: config.trials,
        seed: config.seed,
        rows,
    }
}

impl ActionStats {
    fn record(&mut self, drop: &DropOutcome) {
        self.trials += 1;
        match drop {
            DropOutcome::Jackpot { .. } => self.jackpots += 1,
            DropOutcome::Stack { .. } => {
                self.drops += 1;
                self.stacks += 1;
            }
            DropOutcome::Single { .. } => self.drops += 1,
            DropOutcome::Nothing => {}
        }
        self.total_payout += drop.amount();
    }
}
