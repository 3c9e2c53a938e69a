//! Simulation configuration.

use crate::rewards::ActionKind;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Resolutions rolled per action kind
    pub trials: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Action kinds to simulate
    pub actions: Vec<ActionKind>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = progress)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            seed: None,
            actions: ActionKind::ALL.to_vec(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small deterministic run for smoke tests.
    pub fn quick(seed: u64) -> Self {
        Self {
            trials: 10_000,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }
}
