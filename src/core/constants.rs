// Encounter spawning
pub const SPAWN_CHANCE: f64 = 0.01;
pub const MINOR_ENCOUNTER_CHANCE: f64 = 0.9;
pub const MAJOR_ENCOUNTER_CHANCE: f64 = 0.1;
pub const ENCOUNTER_TTL_SECONDS: u64 = 24 * 60 * 60;
pub const SWEEP_INTERVAL_SECONDS: u64 = 5 * 60;
/// Most closed-encounter records kept for "already reacted" replies.
pub const CLOSED_ENCOUNTER_LIMIT: usize = 10_000;

pub const MINOR_NAMES: [&str; 7] = [
    "Rhoa", "Cannibal", "Goatman", "Crab", "Skeleton", "Zombie", "Drowned",
];
pub const MAJOR_NAMES: [&str; 1] = ["Brine King"];

// Drops
pub const DROP_CHANCE: f64 = 0.10;
pub const STACK_CHANCE: f64 = 0.01;
pub const JACKPOT_BASE: i64 = 100;

// Stack size table: (size, weight), evaluated in order against a cumulative roll.
pub const STACK_SIZE_WEIGHTS: [(i64, f64); 4] = [(5, 0.1), (4, 0.2), (3, 0.3), (2, 0.4)];

// Actions: (emoji, cost, reward multiplier, jackpot chance)
pub const BASIC_ACTION: (&str, i64, i64, f64) = ("⚔️", 0, 1, 0.0);
pub const STRONG_ACTION: (&str, i64, i64, f64) = ("💥", 1, 5, 0.00001);
pub const ULTIMATE_ACTION: (&str, i64, i64, f64) = ("🌟", 5, 10, 0.00006);

// Presentation
pub const CURRENCY_SYMBOL: &str = "<:divine:1278151900981624926>";
pub const LEADERBOARD_SIZE: usize = 10;
pub const STASH_COMMAND: &str = "!stash";
pub const LEADERBOARD_COMMAND: &str = "!leaderboard";

// Storage
pub const DATA_DIR_NAME: &str = ".brinebot";
pub const LEDGER_FILE: &str = "ledger.json";
pub const CONFIG_FILE: &str = "config.json";
