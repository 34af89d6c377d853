//! User configuration module for loading user nicknames from environment variables.
//!
//! This module provides functionality to map Discord user IDs to friendly
//! nicknames configured in the `.env` file. Nicknames are optional and callers
//! fall back to Discord usernames if not configured.

use std::collections::HashMap;

/// Parses a `USER_NICKNAMES` value of the form `id=name,id=name`.
///
/// Malformed pairs (missing `=`, empty id or name) are skipped.
#[must_use]
pub fn parse_nicknames(raw: &str) -> HashMap<String, String> {
    let mut nicknames = HashMap::new();

    for pair in raw.split(',') {
        if let Some((user_id, nickname)) = pair.split_once('=') {
            let user_id = user_id.trim();
            let nickname = nickname.trim();
            if !user_id.is_empty() && !nickname.is_empty() {
                nicknames.insert(user_id.to_string(), nickname.to_string());
            }
        }
    }

    nicknames
}

/// Gets a mapping of user IDs to their configured nicknames from the
/// `USER_NICKNAMES` environment variable.
#[must_use]
pub fn get_user_nicknames() -> HashMap<String, String> {
    std::env::var("USER_NICKNAMES")
        .map(|raw| parse_nicknames(&raw))
        .unwrap_or_default()
}

/// Gets the nickname for a given user ID, if configured.
#[must_use]
pub fn get_nickname(user_id: &str) -> Option<String> {
    let nicknames = get_user_nicknames();
    nicknames.get(user_id).cloned()
}
