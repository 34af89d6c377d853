//! Quiz answer listener - Turns guild messages into answer submissions.
//!
//! Every non-bot guild message is offered to the quiz manager while a
//! session is live. The manager guarantees at most one winner; this
//! handler only announces the result.

use crate::{
    bot::{
        BotData,
        commands::{format_tokens, title_case},
    },
    errors::Result,
};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;

/// Feeds a guild message to the live quiz session, if any, and announces
/// the winner.
///
/// # Errors
/// Returns an error if settling the win or sending the announcement fails.
pub async fn handle_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &BotData,
) -> Result<()> {
    if message.author.bot {
        return Ok(());
    }
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };
    let guild_id = guild_id.to_string();

    let user_id = message.author.id.to_string();
    let Some(win) = data
        .quizzes
        .submit_answer(
            &data.database,
            &data.settings,
            &user_id,
            &guild_id,
            &message.content,
        )
        .await?
    else {
        return Ok(());
    };

    let embed = serenity::CreateEmbed::default()
        .title("🎉 Quiz Winner!")
        .description(format!(
            "{} answered correctly and won **{}**!\n\n**Answer:** {}",
            message.author.mention(),
            format_tokens(win.prize),
            title_case(&win.answer)
        ))
        .color(0x004C_AF50);

    message
        .channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
