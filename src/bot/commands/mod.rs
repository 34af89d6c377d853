//! Command module - All Discord commands exposed by the bot.
//!
//! Commands are thin adapters: parse arguments, call into `core`, and
//! render the outcome. Business-rule errors from core are rendered as
//! specific friendly messages rather than bubbling up as command failures.

/// Balance, daily, work, give, leaderboard, and owner grants
pub mod economy;
/// Coin flip and trivia quiz
pub mod games;
/// Ping and help
pub mod general;
/// Shop browsing, purchases, and inventory display
pub mod shop;

pub use economy::*;
pub use games::*;
pub use general::*;
pub use shop::*;

use crate::{bot::BotData, errors::Error};

/// Formats a token amount with thousands separators, e.g. `1,234,567 T`.
#[must_use]
pub fn format_tokens(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped} T")
    } else {
        format!("{grouped} T")
    }
}

/// Formats a number of seconds as a coarse human duration, e.g. `3h 12m`.
#[must_use]
pub fn format_duration(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Uppercases the first letter of every word, for announcing canonical
/// quiz answers stored in lowercase.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves the guild ID of the invocation, telling the user off when the
/// command was used outside a server. Returns `None` in that case.
pub(crate) async fn require_guild(
    ctx: poise::Context<'_, BotData, Error>,
) -> crate::errors::Result<Option<String>> {
    match ctx.guild_id() {
        Some(guild_id) => Ok(Some(guild_id.to_string())),
        None => {
            ctx.say("❌ This command only works in a server.").await?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens_groups_thousands() {
        assert_eq!(format_tokens(0), "0 T");
        assert_eq!(format_tokens(999), "999 T");
        assert_eq!(format_tokens(1_000), "1,000 T");
        assert_eq!(format_tokens(50_000), "50,000 T");
        assert_eq!(format_tokens(1_234_567), "1,234,567 T");
        assert_eq!(format_tokens(-2_500), "-2,500 T");
    }

    #[test]
    fn test_format_duration_buckets() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(3_600), "1h 0m");
        assert_eq!(format_duration(11_520), "3h 12m");
        assert_eq!(format_duration(-5), "0s");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("paris"), "Paris");
        assert_eq!(title_case("leonardo da vinci"), "Leonardo Da Vinci");
        assert_eq!(title_case(""), "");
    }
}
