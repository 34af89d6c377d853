//! Quiz session manager - One live trivia session per guild.
//!
//! The session map is the single point of truth for liveness: a session is
//! live exactly while its guild key is present. Both resolution paths (a
//! winning answer and the expiry timer) remove the entry under the same
//! lock, so exactly one of them ever observes the session, even when
//! answers race each other or the timer within the same instant. Prize
//! credit and the starter's cooldown stamp happen only on the winning path.

use crate::{
    config::economy::EconomySettings,
    entities::{QuizQuestion, quiz_question},
    core::ledger,
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, seq::IndexedRandom};
use sea_orm::{DatabaseConnection, PaginatorTrait, Set, TransactionTrait, prelude::*};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::Mutex;

/// Stock question pool, seeded on first startup.
const DEFAULT_QUESTIONS: &[(&str, &str)] = &[
    ("What is the capital of France?", "paris"),
    ("What is 15 x 8?", "120"),
    ("What year did World War II end?", "1945"),
    ("What is the largest planet in our solar system?", "jupiter"),
    ("Who painted the Mona Lisa?", "leonardo da vinci"),
    ("What is the chemical symbol for gold?", "au"),
    ("Who wrote Romeo and Juliet?", "william shakespeare"),
    ("What is the square root of 144?", "12"),
    ("What is the hardest natural substance on Earth?", "diamond"),
    ("In what year was the first iPhone released?", "2007"),
    ("What is the smallest country in the world?", "vatican city"),
    ("What gas do plants absorb from the atmosphere?", "carbon dioxide"),
    ("What is the currency of Japan?", "yen"),
    ("How many sides does a hexagon have?", "6"),
    ("What is the boiling point of water in Celsius?", "100"),
    ("Who developed the theory of relativity?", "albert einstein"),
    ("What is the largest ocean on Earth?", "pacific ocean"),
    ("What is 2 to the power of 10?", "1024"),
    ("What is the most abundant gas in Earth's atmosphere?", "nitrogen"),
    ("What planet is known as the Red Planet?", "mars"),
];

/// A live trivia session scoped to one guild.
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Unique id distinguishing this session from any later one in the
    /// same guild, so a stale expiry timer cannot kill a newer session
    pub id: u64,
    /// Question shown to the guild
    pub question: String,
    /// Canonical accepted answer, lowercase
    pub answer: String,
    /// User who started the session; their cooldown is stamped on a win
    pub starter_id: String,
    /// When the session was created
    pub started_at: DateTime<Utc>,
}

/// Handed to the command layer when a session starts.
#[derive(Debug, Clone)]
pub struct QuizTicket {
    /// Id to pass back to [`QuizManager::expire`] when the window closes
    pub session_id: u64,
    /// Question to announce
    pub question: String,
    /// Prize to announce
    pub prize: i64,
}

/// A session resolved by a winning answer.
#[derive(Debug, Clone)]
pub struct QuizWin {
    /// The winning user
    pub winner_id: String,
    /// Canonical answer, for the announcement
    pub answer: String,
    /// Prize credited to the winner
    pub prize: i64,
    /// Winner's balance after the credit
    pub winner_balance: i64,
}

/// A session resolved by timeout.
#[derive(Debug, Clone)]
pub struct ExpiredQuiz {
    /// Canonical answer, for the announcement
    pub answer: String,
}

/// Owns the per-guild live session table.
#[derive(Debug, Default)]
pub struct QuizManager {
    sessions: Mutex<HashMap<String, QuizSession>>,
    next_session_id: AtomicU64,
}

impl QuizManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for a guild.
    ///
    /// The starter must be off quiz cooldown unless `bypass_cooldown` is
    /// set (the owner privilege). The conflict check and the insert happen
    /// under one lock acquisition, so two racing starts cannot both
    /// succeed.
    ///
    /// # Errors
    /// Returns [`Error::CooldownActive`] if the starter is cooldown-gated,
    /// [`Error::QuizInProgress`] if the guild already has a live session,
    /// or a database error if a storage operation fails.
    pub async fn start(
        &self,
        db: &DatabaseConnection,
        settings: &EconomySettings,
        rng: &mut impl Rng,
        user_id: &str,
        guild_id: &str,
        bypass_cooldown: bool,
    ) -> Result<QuizTicket> {
        if !bypass_cooldown {
            let window = Duration::hours(settings.quiz_cooldown_hours);
            if let Some(remaining) =
                ledger::quiz_cooldown_remaining(db, user_id, guild_id, window).await?
            {
                return Err(Error::CooldownActive {
                    remaining_secs: remaining.num_seconds().max(1),
                });
            }
        }

        let (question, answer) = pick_question(db, rng).await?;

        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(guild_id) {
            return Err(Error::QuizInProgress);
        }

        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        sessions.insert(
            guild_id.to_string(),
            QuizSession {
                id,
                question: question.clone(),
                answer: answer.to_lowercase(),
                starter_id: user_id.to_string(),
                started_at: Utc::now(),
            },
        );

        Ok(QuizTicket {
            session_id: id,
            question,
            prize: settings.quiz_prize,
        })
    }

    /// Feeds a candidate answer to the guild's live session, if any.
    ///
    /// The first matching submission removes the session and becomes the
    /// single winner; the prize is credited to the submitter and the quiz
    /// cooldown is stamped against the session **starter**. Returns `None`
    /// when there is no live session, the answer does not match, or the
    /// session was already resolved.
    ///
    /// # Errors
    /// Returns an error if a storage operation fails while settling a win.
    pub async fn submit_answer(
        &self,
        db: &DatabaseConnection,
        settings: &EconomySettings,
        user_id: &str,
        guild_id: &str,
        text: &str,
    ) -> Result<Option<QuizWin>> {
        let session = {
            let mut sessions = self.sessions.lock().await;
            let matched = sessions
                .get(guild_id)
                .is_some_and(|session| answer_matches(text, &session.answer));
            if matched {
                sessions.remove(guild_id)
            } else {
                None
            }
        };

        let Some(session) = session else {
            return Ok(None);
        };

        let txn = db.begin().await?;
        let winner_balance =
            ledger::apply_delta(&txn, user_id, guild_id, settings.quiz_prize).await?;
        ledger::record_quiz_cooldown(&txn, &session.starter_id, guild_id).await?;
        txn.commit().await?;

        Ok(Some(QuizWin {
            winner_id: user_id.to_string(),
            answer: session.answer,
            prize: settings.quiz_prize,
            winner_balance,
        }))
    }

    /// Expires a session after its answer window.
    ///
    /// Removes the session only if the same one is still live: a session
    /// already resolved by a winner, or replaced by a newer session, makes
    /// this a no-op. No prize is credited and no cooldown is stamped.
    pub async fn expire(&self, guild_id: &str, session_id: u64) -> Option<ExpiredQuiz> {
        let mut sessions = self.sessions.lock().await;
        let still_live = sessions
            .get(guild_id)
            .is_some_and(|session| session.id == session_id);
        if !still_live {
            return None;
        }
        sessions.remove(guild_id).map(|session| ExpiredQuiz {
            answer: session.answer,
        })
    }

    /// True if the guild currently has a live session.
    pub async fn is_active(&self, guild_id: &str) -> bool {
        self.sessions.lock().await.contains_key(guild_id)
    }
}

/// Lenient answer comparison: trimmed, case-insensitive, accepting an exact
/// match or substring containment in either direction, so "I think it's
/// paris" wins against "paris".
#[must_use]
pub fn answer_matches(candidate: &str, expected: &str) -> bool {
    let candidate = candidate.trim().to_lowercase();
    let expected = expected.trim().to_lowercase();
    if candidate.is_empty() || expected.is_empty() {
        return false;
    }
    candidate == expected || candidate.contains(&expected) || expected.contains(&candidate)
}

/// Draws a random question from the pool. Falls back to a stock question
/// if the pool is empty.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn pick_question(
    db: &DatabaseConnection,
    rng: &mut impl Rng,
) -> Result<(String, String)> {
    let questions = QuizQuestion::find().all(db).await?;
    Ok(questions.choose(rng).map_or_else(
        || ("What is 2+2?".to_string(), "4".to_string()),
        |q| (q.question.clone(), q.answer.clone()),
    ))
}

/// Seeds the stock question pool if the table is empty. Returns how many
/// questions were inserted.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn seed_default_questions(db: &DatabaseConnection) -> Result<u64> {
    if QuizQuestion::find().count(db).await? > 0 {
        return Ok(0);
    }

    let models: Vec<quiz_question::ActiveModel> = DEFAULT_QUESTIONS
        .iter()
        .map(|(question, answer)| quiz_question::ActiveModel {
            question: Set((*question).to_string()),
            answer: Set((*answer).to_string()),
            ..Default::default()
        })
        .collect();
    let inserted = models.len() as u64;

    QuizQuestion::insert_many(models).exec(db).await?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_answer_matching_rules() {
        assert!(answer_matches("paris", "paris"));
        assert!(answer_matches("Paris", "paris"));
        assert!(answer_matches("  paris  ", "paris"));
        assert!(answer_matches("I think it's paris", "paris"));
        // Partial answers count when contained in the canonical one
        assert!(answer_matches("leonardo", "leonardo da vinci"));
        assert!(!answer_matches("london", "paris"));
        assert!(!answer_matches("", "paris"));
        assert!(!answer_matches("   ", "paris"));
    }

    #[tokio::test]
    async fn test_start_rejects_second_session() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(1);

        manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await?;
        let result = manager
            .start(&db, &settings, &mut rng, "someone-else", "g1", false)
            .await;
        assert!(matches!(result, Err(Error::QuizInProgress)));

        // Other guilds are unaffected
        manager
            .start(&db, &settings, &mut rng, "starter", "g2", false)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_start_respects_cooldown_and_bypass() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(2);

        ledger::record_quiz_cooldown(&db, "starter", "g1").await?;

        let result = manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await;
        assert!(matches!(result, Err(Error::CooldownActive { .. })));

        // The owner bypass ignores the cooldown entirely
        manager
            .start(&db, &settings, &mut rng, "starter", "g1", true)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_winning_answer_resolves_once() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(3);

        let ticket = manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await?;

        let win = manager
            .submit_answer(&db, &settings, "winner", "g1", "Paris")
            .await?
            .unwrap();
        assert_eq!(win.winner_id, "winner");
        assert_eq!(win.prize, 50_000);
        assert_eq!(ledger::get_balance(&db, "winner", "g1").await?, 50_000);

        // Cooldown lands on the starter, not the winner
        assert!(
            !ledger::can_start_quiz(&db, "starter", "g1", Duration::hours(1)).await?
        );
        assert!(ledger::can_start_quiz(&db, "winner", "g1", Duration::hours(1)).await?);

        // The session is gone: late answers and the stale timer are no-ops
        assert!(!manager.is_active("g1").await);
        let late = manager
            .submit_answer(&db, &settings, "latecomer", "g1", "paris")
            .await?;
        assert!(late.is_none());
        assert!(manager.expire("g1", ticket.session_id).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_answer_variations_all_win() -> Result<()> {
        for candidate in ["Paris", " paris ", "I think it's paris"] {
            let db = setup_test_db().await?;
            let settings = EconomySettings::default();
            let manager = QuizManager::new();
            insert_question(&db, "What is the capital of France?", "paris").await?;
            let mut rng = seeded_rng(4);

            manager
                .start(&db, &settings, &mut rng, "starter", "g1", false)
                .await?;
            let win = manager
                .submit_answer(&db, &settings, "winner", "g1", candidate)
                .await?;
            assert!(win.is_some(), "expected '{candidate}' to win");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_answer_keeps_session_live() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(5);

        manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await?;
        let miss = manager
            .submit_answer(&db, &settings, "guesser", "g1", "london")
            .await?;
        assert!(miss.is_none());
        assert!(manager.is_active("g1").await);
        assert_eq!(ledger::get_balance(&db, "guesser", "g1").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_timeout_credits_nothing_and_skips_cooldown() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(6);

        let ticket = manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await?;

        let expired = manager.expire("g1", ticket.session_id).await.unwrap();
        assert_eq!(expired.answer, "paris");
        assert!(!manager.is_active("g1").await);

        // No prize was credited and the starter's cooldown was not stamped
        assert_eq!(ledger::get_balance(&db, "starter", "g1").await?, 0);
        assert!(ledger::can_start_quiz(&db, "starter", "g1", Duration::hours(1)).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_timer_cannot_kill_newer_session() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(7);

        let first = manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await?;
        manager
            .submit_answer(&db, &settings, "winner", "g1", "paris")
            .await?
            .unwrap();

        // A new session starts before the first timer fires
        let second = manager
            .start(&db, &settings, &mut rng, "starter", "g1", true)
            .await?;
        assert!(manager.expire("g1", first.session_id).await.is_none());
        assert!(manager.is_active("g1").await);
        assert!(manager.expire("g1", second.session_id).await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_racing_answers_produce_one_winner() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = EconomySettings::default();
        let manager = QuizManager::new();
        insert_question(&db, "What is the capital of France?", "paris").await?;
        let mut rng = seeded_rng(8);

        manager
            .start(&db, &settings, &mut rng, "starter", "g1", false)
            .await?;

        let (a, b) = tokio::join!(
            manager.submit_answer(&db, &settings, "racer-a", "g1", "paris"),
            manager.submit_answer(&db, &settings, "racer-b", "g1", "paris"),
        );
        let wins = [a?, b?].into_iter().flatten().count();
        assert_eq!(wins, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_default_questions_once() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(seed_default_questions(&db).await?, 20);
        assert_eq!(seed_default_questions(&db).await?, 0);
        assert_eq!(QuizQuestion::find().count(&db).await?, 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_pick_question_empty_pool_falls_back() -> Result<()> {
        let db = setup_test_db().await?;
        let mut rng = seeded_rng(9);
        let (question, answer) = pick_question(&db, &mut rng).await?;
        assert_eq!(question, "What is 2+2?");
        assert_eq!(answer, "4");
        Ok(())
    }
}
