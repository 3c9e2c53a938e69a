use serde::{Deserialize, Serialize};

/// The two encounter tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    Minor,
    Major,
}

impl EncounterKind {
    /// Major encounters advertise the costed actions in their prompt.
    pub fn offers_costed_actions(&self) -> bool {
        matches!(self, EncounterKind::Major)
    }
}

/// Actions a player can take on an encounter, one per reaction symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Basic,
    Strong,
    Ultimate,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Basic, ActionKind::Strong, ActionKind::Ultimate];

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Basic => "attack",
            ActionKind::Strong => "strong attack",
            ActionKind::Ultimate => "ultimate attack",
        }
    }
}

/// Result of the drop roll for one resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// Rare fixed bonus, checked before the normal drop.
    Jackpot { amount: i64 },
    /// A normal drop of `multiplier` currency.
    Single { amount: i64 },
    /// A stacked drop of `size * multiplier` currency.
    Stack { size: i64, amount: i64 },
    /// No drop at all.
    Nothing,
}

impl DropOutcome {
    /// Currency credited by this outcome.
    pub fn amount(&self) -> i64 {
        match self {
            DropOutcome::Jackpot { amount }
            | DropOutcome::Single { amount }
            | DropOutcome::Stack { amount, .. } => *amount,
            DropOutcome::Nothing => 0,
        }
    }

    pub fn is_stacked(&self) -> bool {
        matches!(self, DropOutcome::Stack { .. })
    }

    pub fn is_jackpot(&self) -> bool {
        matches!(self, DropOutcome::Jackpot { .. })
    }

    pub fn dropped(&self) -> bool {
        !matches!(self, DropOutcome::Nothing)
    }
}
