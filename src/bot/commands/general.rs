//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**TokenTill Help**\n\
        Here is a summary of all available commands.\n\n\
        **💳 Basic Commands**\n\
        • `/balance [user]` - Check a token balance.\n\
        • `/daily` - Claim the daily reward (24h cooldown).\n\
        • `/work` - Work a shift to earn tokens.\n\n\
        **🎮 Games & Earning**\n\
        • `/quiz` - Start a trivia quiz; the first correct answer wins the prize.\n\
        • `/flip <amount>` - Bet tokens on a coin flip.\n\n\
        **🛒 Shop & Trading**\n\
        • `/shop [category]` - Browse the shop.\n\
        • `/buy <category> <item>` - Buy an item.\n\
        • `/inventory [user]` - View an inventory.\n\n\
        **👥 Social**\n\
        • `/give <user> <amount>` - Transfer tokens.\n\
        • `/leaderboard` - Top 10 richest users.\n\n\
        Pets grant daily bonuses, artifacts change your flip odds!";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
