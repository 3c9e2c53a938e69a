//! Open encounters and their registry.

pub mod registry;
pub mod types;

pub use registry::EncounterRegistry;
pub use types::Encounter;
