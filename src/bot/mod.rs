//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the token economy,
//! including all commands, the quiz answer listener, and bot context
//! management.

/// Discord command implementations (economy, games, shop, general)
pub mod commands;
/// Discord event handlers (quiz answer listener)
pub mod handlers;

use crate::{
    config::economy::EconomySettings,
    core::{quiz::QuizManager, shop::ShopCatalog},
    errors::Error,
};
use poise::serenity_prelude as serenity;
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tracing::info;

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// Database connection for all ledger and inventory operations
    pub database: DatabaseConnection,
    /// Economy tuning constants
    pub settings: EconomySettings,
    /// The immutable shop catalog
    pub catalog: ShopCatalog,
    /// Per-guild live quiz sessions
    pub quizzes: QuizManager,
    /// Shared random source; tests use a seeded one instead
    pub rng: Mutex<StdRng>,
}

impl BotData {
    /// Creates the shared bot context from a database connection and
    /// economy settings, with the standard catalog and an OS-seeded RNG.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: EconomySettings) -> Self {
        Self {
            database,
            settings,
            catalog: ShopCatalog::standard(),
            quizzes: QuizManager::new(),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework and runs the bot until it disconnects.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway
/// connection fails.
pub async fn run_bot(token: String, data: BotData) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::balance(),
                commands::daily(),
                commands::work(),
                commands::give(),
                commands::leaderboard(),
                commands::grant_tokens(),
                commands::flip(),
                commands::quiz(),
                commands::shop(),
                commands::buy(),
                commands::inventory(),
                commands::ping(),
                commands::help(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // MESSAGE_CONTENT is required to read quiz answers and prefix commands
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await;

    match client {
        Ok(mut c) => {
            info!("Starting bot client...");
            if let Err(why) = c.start().await {
                tracing::error!("Client error: {why:?}");
                return Err(why);
            }
        }
        Err(e) => {
            tracing::error!("Error creating client: {e:?}");
            return Err(e);
        }
    }
    Ok(())
}
