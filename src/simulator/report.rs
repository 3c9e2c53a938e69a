//! Simulation report generation.

use serde::Serialize;

use crate::rewards::ActionKind;

/// Tallies for one action kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionStats {
    pub action: ActionKind,
    pub cost: i64,
    pub trials: u64,
    /// Normal drops, stacks included
    pub drops: u64,
    pub stacks: u64,
    pub jackpots: u64,
    pub total_payout: i64,
}

impl ActionStats {
    pub fn new(action: ActionKind, cost: i64) -> Self {
        Self {
            action,
            cost,
            trials: 0,
            drops: 0,
            stacks: 0,
            jackpots: 0,
            total_payout: 0,
        }
    }

    pub fn drop_rate(&self) -> f64 {
        self.drops as f64 / self.trials.max(1) as f64
    }

    pub fn stack_rate(&self) -> f64 {
        self.stacks as f64 / self.drops.max(1) as f64
    }

    pub fn mean_payout(&self) -> f64 {
        self.total_payout as f64 / self.trials.max(1) as f64
    }

    /// Average currency gained per use once the cost is paid.
    pub fn mean_net(&self) -> f64 {
        self.mean_payout() - self.cost as f64
    }
}

/// Aggregated results of a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub trials: u64,
    pub seed: Option<u64>,
    pub rows: Vec<ActionStats>,
}

impl SimReport {
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    REWARD SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Trials per action: {}\n", self.trials));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push('\n');

        report.push_str(
            "  Action      Cost   Drop %   Stack %   Jackpots   Mean     Net\n",
        );
        report.push_str(
            "  ──────────  ────   ──────   ───────   ────────   ──────   ──────\n",
        );
        for row in &self.rows {
            report.push_str(&format!(
                "  {:<10}  {:>4}   {:>5.2}%   {:>6.2}%   {:>8}   {:>6.3}   {:>6.3}\n",
                format!("{:?}", row.action),
                row.cost,
                row.drop_rate() * 100.0,
                row.stack_rate() * 100.0,
                row.jackpots,
                row.mean_payout(),
                row.mean_net(),
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
