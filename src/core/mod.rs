//! Game constants and configuration.

pub mod config;
pub mod constants;

pub use config::GameConfig;
