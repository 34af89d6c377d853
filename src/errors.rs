//! Unified error types for `TokenTill`.
//!
//! Every business rule the economy enforces has its own variant so the
//! command layer can render a specific, friendly message. Business-rule
//! errors are always raised before any state is mutated.

use thiserror::Error;

/// All errors the bot can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Underlying database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting failed while building a reply
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// An amount argument was zero or negative
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// A user tried to transfer tokens to themselves
    #[error("Cannot transfer tokens to yourself")]
    SelfTransfer,

    /// Balance is too low for the requested operation
    #[error("Insufficient funds: balance is {balance}, needed {required}")]
    InsufficientFunds {
        /// Current balance of the account
        balance: i64,
        /// Amount the operation required
        required: i64,
    },

    /// A reward was requested before its cooldown window elapsed
    #[error("On cooldown for another {remaining_secs} seconds")]
    CooldownActive {
        /// Seconds until the reward becomes claimable again
        remaining_secs: i64,
    },

    /// A quiz start was requested while one is already live in the guild
    #[error("A quiz is already running in this server")]
    QuizInProgress,

    /// A shop category name matched nothing in the catalog
    #[error("Unknown shop category: {category}")]
    UnknownCategory {
        /// The rejected category name
        category: String,
    },

    /// An item name matched nothing in the given catalog category
    #[error("Item '{name}' not found in the {category} category")]
    ItemNotFound {
        /// Category that was searched
        category: String,
        /// The rejected item name
        name: String,
    },

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Framework(Box::new(value))
    }
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
