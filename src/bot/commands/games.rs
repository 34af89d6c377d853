//! Game Discord commands - coin flip wagers and the trivia quiz.
//!
//! The quiz command owns the session's answer window: it announces the
//! question, sleeps for the configured window, then expires the session if
//! no winning answer removed it first. The answer listener lives in the
//! handlers module.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{format_duration, format_tokens, require_guild, title_case},
        },
        core::rewards,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Bets tokens on a coin flip.
    #[poise::command(slash_command, prefix_command)]
    pub async fn flip(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount to bet"] amount: i64,
    ) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let outcome = {
            let mut rng = data.rng.lock().await;
            rewards::wager_flip(
                &data.database,
                &data.settings,
                &data.catalog,
                &mut *rng,
                &user_id,
                &guild_id,
                amount,
            )
            .await
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(Error::InvalidAmount { .. }) => {
                ctx.say("❌ Amount must be positive!").await?;
                return Ok(());
            }
            Err(Error::InsufficientFunds { balance, .. }) => {
                ctx.say(format!(
                    "❌ You only have **{}** but tried to bet **{}**!",
                    format_tokens(balance),
                    format_tokens(amount)
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let mut embed = if outcome.won {
            serenity::CreateEmbed::default()
                .title("🪙 Coin Flip - You Won!")
                .description(format!(
                    "🎉 **Heads!** You won **{}**!\n\nNew balance: **{}**",
                    format_tokens(outcome.stake),
                    format_tokens(outcome.new_balance)
                ))
                .color(0x004C_AF50)
        } else {
            serenity::CreateEmbed::default()
                .title("🪙 Coin Flip - You Lost!")
                .description(format!(
                    "😢 **Tails!** You lost **{}**!\n\nNew balance: **{}**",
                    format_tokens(outcome.stake),
                    format_tokens(outcome.new_balance)
                ))
                .color(0x00FF_6B6B)
        };

        if outcome.refund > 0 {
            embed = embed.field(
                "🛡️ Insurance",
                format!(
                    "Your insurance refunded **{}**!",
                    format_tokens(outcome.refund)
                ),
                false,
            );
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Starts a trivia quiz; the first correct answer in the channel wins.
    #[poise::command(slash_command, prefix_command)]
    pub async fn quiz(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        // The bot owner may start quizzes without waiting out the cooldown
        let is_owner = ctx.framework().options().owners.contains(&ctx.author().id);

        let ticket = {
            let mut rng = data.rng.lock().await;
            data.quizzes
                .start(
                    &data.database,
                    &data.settings,
                    &mut *rng,
                    &user_id,
                    &guild_id,
                    is_owner,
                )
                .await
        };

        let ticket = match ticket {
            Ok(ticket) => ticket,
            Err(Error::CooldownActive { remaining_secs }) => {
                ctx.say(format!(
                    "⏰ You can only start a quiz every {}! Try again in {}.",
                    format_duration(data.settings.quiz_cooldown_hours * 3600),
                    format_duration(remaining_secs)
                ))
                .await?;
                return Ok(());
            }
            Err(Error::QuizInProgress) => {
                ctx.say("🧠 There's already a quiz running in this server!")
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let embed = serenity::CreateEmbed::default()
            .title(format!(
                "🧠 Trivia Quiz - {} Prize!",
                format_tokens(ticket.prize)
            ))
            .description(format!(
                "**Question:** {}\n\nFirst correct answer wins **{}**!",
                ticket.question,
                format_tokens(ticket.prize)
            ))
            .color(0x0021_96F3)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "You have {} seconds to answer!",
                data.settings.quiz_window_secs
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;

        // Race the answer window against the listener; whichever removes
        // the session first resolves it
        tokio::time::sleep(std::time::Duration::from_secs(data.settings.quiz_window_secs)).await;

        if let Some(expired) = data.quizzes.expire(&guild_id, ticket.session_id).await {
            let embed = serenity::CreateEmbed::default()
                .title("⏰ Quiz Ended")
                .description(format!(
                    "Time's up! The correct answer was: **{}**",
                    title_case(&expired.answer)
                ))
                .color(0x00FF_9800);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
