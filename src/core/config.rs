//! Tunable game configuration.
//!
//! Every probability, cost and name pool the game uses lives here. Compiled
//! defaults come from [`crate::core::constants`]; a JSON file may override any
//! subset of fields (missing fields keep their defaults).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::error::ConfigError;
use crate::rewards::types::{ActionKind, EncounterKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub spawn: SpawnConfig,
    pub rewards: RewardConfig,
    pub actions: ActionTable,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Chance that an ordinary message spawns an encounter.
    pub spawn_chance: f64,
    pub minor_chance: f64,
    pub major_chance: f64,
    pub minor_names: Vec<String>,
    pub major_names: Vec<String>,
    /// Open encounters older than this stop accepting reactions. `None` keeps
    /// them forever.
    pub encounter_ttl_seconds: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            spawn_chance: SPAWN_CHANCE,
            minor_chance: MINOR_ENCOUNTER_CHANCE,
            major_chance: MAJOR_ENCOUNTER_CHANCE,
            minor_names: MINOR_NAMES.iter().map(|s| s.to_string()).collect(),
            major_names: MAJOR_NAMES.iter().map(|s| s.to_string()).collect(),
            encounter_ttl_seconds: Some(ENCOUNTER_TTL_SECONDS),
        }
    }
}

impl SpawnConfig {
    pub fn names_for(&self, kind: EncounterKind) -> &[String] {
        match kind {
            EncounterKind::Minor => &self.minor_names,
            EncounterKind::Major => &self.major_names,
        }
    }

    pub fn ttl(&self) -> Option<chrono::Duration> {
        self.encounter_ttl_seconds
            .map(|secs| chrono::Duration::seconds(secs.min(i64::MAX as u64) as i64))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackWeight {
    pub size: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Chance that a non-jackpot action drops anything.
    pub drop_chance: f64,
    /// Chance that a drop is a stack rather than a single unit.
    pub stack_chance: f64,
    pub stack_sizes: Vec<StackWeight>,
    /// Jackpot payout before the action multiplier.
    pub jackpot_base: i64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            drop_chance: DROP_CHANCE,
            stack_chance: STACK_CHANCE,
            stack_sizes: STACK_SIZE_WEIGHTS
                .iter()
                .map(|&(size, weight)| StackWeight { size, weight })
                .collect(),
            jackpot_base: JACKPOT_BASE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub emoji: String,
    pub cost: i64,
    pub multiplier: i64,
    pub jackpot_chance: f64,
}

impl ActionSpec {
    fn from_const(spec: (&str, i64, i64, f64)) -> Self {
        let (emoji, cost, multiplier, jackpot_chance) = spec;
        Self {
            emoji: emoji.to_string(),
            cost,
            multiplier,
            jackpot_chance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionTable {
    pub basic: ActionSpec,
    pub strong: ActionSpec,
    pub ultimate: ActionSpec,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            basic: ActionSpec::from_const(BASIC_ACTION),
            strong: ActionSpec::from_const(STRONG_ACTION),
            ultimate: ActionSpec::from_const(ULTIMATE_ACTION),
        }
    }
}

impl ActionTable {
    pub fn spec(&self, kind: ActionKind) -> &ActionSpec {
        match kind {
            ActionKind::Basic => &self.basic,
            ActionKind::Strong => &self.strong,
            ActionKind::Ultimate => &self.ultimate,
        }
    }

    /// Map a reaction symbol to its action. Emoji variation selectors are
    /// ignored since platforms disagree on whether to send them.
    pub fn kind_for_emoji(&self, emoji: &str) -> Option<ActionKind> {
        let wanted = strip_variation(emoji);
        ActionKind::ALL
            .into_iter()
            .find(|&kind| strip_variation(&self.spec(kind).emoji) == wanted)
    }
}

fn strip_variation(emoji: &str) -> String {
    emoji.chars().filter(|&c| c != '\u{fe0f}').collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub leaderboard_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

impl GameConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist and parse. Without one, the default file
    /// in the data directory is used when present, otherwise compiled
    /// defaults.
    pub fn load(path: Option<&Path>, data_dir: &Path) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = data_dir.join(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("spawn.spawn_chance", self.spawn.spawn_chance),
            ("spawn.minor_chance", self.spawn.minor_chance),
            ("spawn.major_chance", self.spawn.major_chance),
            ("rewards.drop_chance", self.rewards.drop_chance),
            ("rewards.stack_chance", self.rewards.stack_chance),
            ("actions.basic.jackpot_chance", self.actions.basic.jackpot_chance),
            ("actions.strong.jackpot_chance", self.actions.strong.jackpot_chance),
            ("actions.ultimate.jackpot_chance", self.actions.ultimate.jackpot_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} must be within [0, 1], got {p}")));
            }
        }

        if self.spawn.minor_chance + self.spawn.major_chance > 1.0 + f64::EPSILON {
            return Err(invalid("spawn.minor_chance + spawn.major_chance exceeds 1"));
        }
        if self.spawn.minor_names.is_empty() || self.spawn.major_names.is_empty() {
            return Err(invalid("encounter name pools must not be empty"));
        }

        if self.rewards.stack_sizes.is_empty() {
            return Err(invalid("rewards.stack_sizes must not be empty"));
        }
        if self.rewards.stack_sizes.iter().any(|s| s.weight < 0.0 || s.size < 1) {
            return Err(invalid("stack sizes must be positive with non-negative weights"));
        }
        let total: f64 = self.rewards.stack_sizes.iter().map(|s| s.weight).sum();
        if total > 1.0 + 1e-9 {
            return Err(invalid(format!("stack weights sum to {total}, above 1")));
        }
        if self.rewards.jackpot_base < 0 {
            return Err(invalid("rewards.jackpot_base must not be negative"));
        }

        let mut emojis = HashSet::new();
        for kind in ActionKind::ALL {
            let spec = self.actions.spec(kind);
            if spec.cost < 0 || spec.multiplier < 0 {
                return Err(invalid(format!(
                    "{} cost and multiplier must not be negative",
                    kind.label()
                )));
            }
            if !emojis.insert(strip_variation(&spec.emoji)) {
                return Err(invalid(format!("duplicate action emoji {}", spec.emoji)));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
