//! Discord event handlers.
//!
//! The only event the bot listens to beyond commands is guild messages,
//! which feed the live quiz sessions.

/// Quiz answer listener
pub mod quiz_answers;

use crate::{bot::BotData, errors::Error};
use poise::serenity_prelude as serenity;

/// Dispatches gateway events to the interested handlers.
///
/// # Errors
/// Returns an error if a handler fails.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> crate::errors::Result<()> {
    if let serenity::FullEvent::Message { new_message } = event {
        quiz_answers::handle_message(ctx, new_message, data).await?;
    }
    Ok(())
}
