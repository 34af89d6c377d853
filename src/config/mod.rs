//! Configuration management for database and application settings.

/// Database configuration and connection management
pub mod database;

/// Economy tuning constants loaded from config.toml
pub mod economy;

/// User nickname configuration from environment variables
pub mod users;

use crate::errors::Result;

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,
    /// Economy tuning constants
    pub economy: economy::EconomySettings,
}

/// Loads the complete application configuration.
///
/// Economy settings come from `config.toml` if present (defaults otherwise),
/// the database URL from the `DATABASE_URL` environment variable.
///
/// # Errors
/// Returns an error if `config.toml` exists but cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let economy = economy::load_default_settings()?;
    let database_url = database::get_database_url();
    Ok(AppConfig {
        database_url,
        economy,
    })
}
