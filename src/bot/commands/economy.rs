//! Economy Discord commands - balance, daily, work, give, leaderboard.
//!
//! These commands interact with the ledger and reward engine through the
//! core modules and render outcomes as embeds or short messages.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{format_duration, format_tokens, require_guild},
        },
        config,
        core::{ledger, rewards},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use poise::serenity_prelude::Mentionable;
    use std::fmt::Write;

    /// Shows a user's current token balance.
    #[poise::command(slash_command, prefix_command, aliases("bal"))]
    pub async fn balance(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to check (defaults to you)"] user: Option<serenity::User>,
    ) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };

        let target = user.as_ref().unwrap_or_else(|| ctx.author());
        let balance =
            ledger::get_balance(&ctx.data().database, &target.id.to_string(), &guild_id).await?;

        let embed = serenity::CreateEmbed::default()
            .title(format!("💰 {}'s Balance", target.name))
            .description(format!("**{}**", format_tokens(balance)))
            .color(0x00FF_D700);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Claims the daily token reward (24-hour cooldown, boosted by pets).
    #[poise::command(slash_command, prefix_command)]
    pub async fn daily(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let reward = {
            let mut rng = data.rng.lock().await;
            rewards::claim_daily(
                &data.database,
                &data.settings,
                &data.catalog,
                &mut *rng,
                &user_id,
                &guild_id,
            )
            .await
        };

        match reward {
            Ok(reward) => {
                let mut embed = serenity::CreateEmbed::default()
                    .title("🎁 Daily Reward Claimed!")
                    .description(format!(
                        "You received **{}**!",
                        format_tokens(reward.total)
                    ))
                    .color(0x004C_AF50);

                if !reward.bonuses.is_empty() {
                    let mut bonus_lines = String::new();
                    for (name, amount) in &reward.bonuses {
                        writeln!(&mut bonus_lines, "{name}: **{}**", format_tokens(*amount))?;
                    }
                    embed = embed.field("🐾 Pet Bonus", bonus_lines, false);
                }

                ctx.send(poise::CreateReply::default().embed(embed)).await?;
            }
            Err(Error::CooldownActive { remaining_secs }) => {
                ctx.say(format!(
                    "⏰ You've already claimed your daily reward! Come back in {}.",
                    format_duration(remaining_secs)
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Works a shift for a small random payout. No cooldown.
    #[poise::command(slash_command, prefix_command)]
    pub async fn work(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let reward = {
            let mut rng = data.rng.lock().await;
            rewards::work(&data.database, &data.settings, &mut *rng, &user_id, &guild_id).await?
        };

        ctx.say(format!(
            "💼 You worked hard and earned **{}**!",
            format_tokens(reward.amount)
        ))
        .await?;
        Ok(())
    }

    /// Transfers tokens to another user.
    #[poise::command(slash_command, prefix_command)]
    pub async fn give(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Recipient"] user: serenity::User,
        #[description = "Amount to give"] amount: i64,
    ) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };

        if user.bot {
            ctx.say("❌ You can't give tokens to bots!").await?;
            return Ok(());
        }

        let sender_id = ctx.author().id.to_string();
        let result = ledger::transfer(
            &ctx.data().database,
            &sender_id,
            &user.id.to_string(),
            &guild_id,
            amount,
        )
        .await;

        match result {
            Ok(_) => {
                ctx.say(format!(
                    "💸 {} gave **{}** to {}!",
                    ctx.author().mention(),
                    format_tokens(amount),
                    user.mention()
                ))
                .await?;
            }
            Err(Error::InvalidAmount { .. }) => {
                ctx.say("❌ Amount must be positive!").await?;
            }
            Err(Error::SelfTransfer) => {
                ctx.say("❌ You can't give tokens to yourself!").await?;
            }
            Err(Error::InsufficientFunds { balance, .. }) => {
                ctx.say(format!(
                    "❌ You only have **{}** but tried to give **{}**!",
                    format_tokens(balance),
                    format_tokens(amount)
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Displays the richest users of the server.
    #[poise::command(slash_command, prefix_command, aliases("lb", "top"))]
    pub async fn leaderboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };

        let top = ledger::get_leaderboard(&ctx.data().database, &guild_id, 10).await?;

        if top.is_empty() {
            ctx.say("🏆 No one has earned any tokens yet!").await?;
            return Ok(());
        }

        let mut lines = String::new();
        for (i, account) in top.iter().enumerate() {
            // Nickname config first, then Discord username, then a placeholder
            let name = if let Some(nickname) = config::users::get_nickname(&account.user_id) {
                nickname
            } else if let Ok(user_id_val) = account.user_id.parse::<u64>() {
                let user_id = serenity::UserId::new(user_id_val);
                match user_id.to_user(ctx.serenity_context()).await {
                    Ok(user) => user.name,
                    Err(_) => "Unknown User".to_string(),
                }
            } else {
                "Unknown User".to_string()
            };

            let medal = match i {
                0 => "🥇".to_string(),
                1 => "🥈".to_string(),
                2 => "🥉".to_string(),
                _ => format!("{}.", i + 1),
            };
            writeln!(
                &mut lines,
                "{medal} **{name}** - {}",
                format_tokens(account.balance)
            )?;
        }

        let embed = serenity::CreateEmbed::default()
            .title("🏆 Token Leaderboard - Top 10")
            .description(lines)
            .color(0x00FF_D700);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Owner-only: credits tokens to your own balance.
    #[poise::command(slash_command, prefix_command, owners_only, hide_in_help)]
    pub async fn grant_tokens(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount to add"] amount: Option<i64>,
    ) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };

        let amount = amount.unwrap_or(1_000_000);
        let user_id = ctx.author().id.to_string();
        ledger::adjust_balance(&ctx.data().database, &user_id, &guild_id, amount).await?;

        ctx.say(format!(
            "💰 Added **{}** to your balance!",
            format_tokens(amount)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
