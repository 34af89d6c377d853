//! Shared test utilities for `TokenTill`.
//!
//! This module provides common helper functions for setting up test
//! databases and manipulating accounts in ways production code never does
//! (backdating cooldown stamps, seeding deterministic RNGs).

use crate::{
    entities::{Account, account, quiz_question},
    errors::Result,
};
use chrono::{Duration, Utc};
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A deterministic RNG for reproducible reward outcomes.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Inserts a single quiz question, for tests that need a known answer.
pub async fn insert_question(
    db: &DatabaseConnection,
    question: &str,
    answer: &str,
) -> Result<quiz_question::Model> {
    quiz_question::ActiveModel {
        question: Set(question.to_string()),
        answer: Set(answer.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Moves an account's last daily claim `hours_ago` into the past, to test
/// cooldown expiry without sleeping.
pub async fn backdate_daily_claim(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    hours_ago: i64,
) -> Result<()> {
    let account = Account::find_by_id((user_id.to_string(), guild_id.to_string()))
        .one(db)
        .await?
        .ok_or_else(|| crate::errors::Error::Config {
            message: format!("No account for {user_id}/{guild_id} to backdate"),
        })?;

    let mut active: account::ActiveModel = account.into();
    active.last_daily = Set(Some(Utc::now() - Duration::hours(hours_ago)));
    active.update(db).await?;
    Ok(())
}

/// Moves an account's last quiz cooldown stamp `hours_ago` into the past.
pub async fn backdate_quiz_cooldown(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    hours_ago: i64,
) -> Result<()> {
    let account = Account::find_by_id((user_id.to_string(), guild_id.to_string()))
        .one(db)
        .await?
        .ok_or_else(|| crate::errors::Error::Config {
            message: format!("No account for {user_id}/{guild_id} to backdate"),
        })?;

    let mut active: account::ActiveModel = account.into();
    active.last_quiz = Set(Some(Utc::now() - Duration::hours(hours_ago)));
    active.update(db).await?;
    Ok(())
}
