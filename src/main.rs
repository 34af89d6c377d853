//! `TokenTill` binary entry point.

use dotenvy::dotenv;
use std::env;
use token_till::{
    bot, config,
    core::quiz,
    errors::{Error, Result},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database and schema
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 5. Seed the trivia question pool on first run
    let seeded = quiz::seed_default_questions(&db)
        .await
        .inspect_err(|e| error!("Failed to seed quiz questions: {e}"))?;
    if seeded > 0 {
        info!("Seeded {seeded} quiz questions.");
    }

    // 6. Run the bot. DISCORD_BOT_TOKEN is loaded directly before use
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    let data = bot::BotData::new(db, app_config.economy);
    bot::run_bot(token, data).await.map_err(Error::from)?;

    Ok(())
}
