//! Economy settings loading from config.toml
//!
//! All tunable constants of the token economy live here: reward ranges,
//! cooldown windows, the quiz prize and answer window, and coin-flip odds.
//! Every field has a default matching the stock configuration, so a missing
//! `config.toml` (or a missing `[economy]` table) is not an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tunable constants of the token economy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EconomySettings {
    /// Minimum base daily reward
    pub daily_min: i64,
    /// Maximum base daily reward
    pub daily_max: i64,
    /// Hours between daily claims
    pub daily_cooldown_hours: i64,
    /// Hours a quiz starter must wait after a won quiz before starting another
    pub quiz_cooldown_hours: i64,
    /// Seconds a quiz stays open for answers
    pub quiz_window_secs: u64,
    /// Prize credited to the quiz winner
    pub quiz_prize: i64,
    /// Base win chance of a coin flip, in percent
    pub flip_base_chance: u32,
    /// Minimum payout of the work command
    pub work_min: i64,
    /// Maximum payout of the work command
    pub work_max: i64,
}

impl Default for EconomySettings {
    fn default() -> Self {
        Self {
            daily_min: 1_000,
            daily_max: 5_000,
            daily_cooldown_hours: 24,
            quiz_cooldown_hours: 1,
            quiz_window_secs: 30,
            quiz_prize: 50_000,
            flip_base_chance: 50,
            work_min: 100,
            work_max: 1_000,
        }
    }
}

/// Shape of the config.toml file; other tables are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    economy: EconomySettings,
}

/// Loads economy settings from a TOML file.
///
/// A missing file yields the defaults; a present but unreadable or invalid
/// file is an error.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EconomySettings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(EconomySettings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;

    let parsed: ConfigFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })?;

    Ok(parsed.economy)
}

/// Loads economy settings from the default location (./config.toml).
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<EconomySettings> {
    load_settings("config.toml")
}
