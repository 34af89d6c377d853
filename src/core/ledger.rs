//! Ledger business logic - Balances, cooldown stamps, and transfers.
//!
//! All balance mutations are read-modify-write cycles performed inside a
//! database transaction, so concurrent operations against the same account
//! serialize at the storage layer and no update is lost. Balances are
//! clamped at zero on debit: the store itself never rejects an operation
//! for business reasons, callers that need an insufficient-funds error must
//! check the balance first.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*,
};

/// Result of a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Sender balance after the debit
    pub sender_balance: i64,
    /// Recipient balance after the credit
    pub recipient_balance: i64,
}

async fn find_account<C>(db: &C, user_id: &str, guild_id: &str) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find_by_id((user_id.to_string(), guild_id.to_string()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads the account row for (user, guild), creating a zero-balance row if absent.
async fn load_or_create<C>(db: &C, user_id: &str, guild_id: &str) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = find_account(db, user_id, guild_id).await? {
        return Ok(existing);
    }

    account::ActiveModel {
        user_id: Set(user_id.to_string()),
        guild_id: Set(guild_id.to_string()),
        balance: Set(0),
        last_daily: Set(None),
        last_quiz: Set(None),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves the balance for an account, 0 if the account does not exist yet.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_balance<C>(db: &C, user_id: &str, guild_id: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    Ok(find_account(db, user_id, guild_id)
        .await?
        .map_or(0, |account| account.balance))
}

/// Applies a balance delta within an existing connection or transaction.
///
/// The result is clamped at zero: a debit larger than the current balance
/// zeroes the account rather than going negative. Returns the new balance.
///
/// Callers composing multi-step mutations should invoke this inside their
/// own transaction; [`adjust_balance`] wraps it for standalone use.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn apply_delta<C>(db: &C, user_id: &str, guild_id: &str, delta: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let account = load_or_create(db, user_id, guild_id).await?;
    let new_balance = account.balance.saturating_add(delta).max(0);

    let mut active: account::ActiveModel = account.into();
    active.balance = Set(new_balance);
    active.update(db).await?;

    Ok(new_balance)
}

/// Applies a balance delta as its own transaction. Returns the new balance.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn adjust_balance(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    delta: i64,
) -> Result<i64> {
    let txn = db.begin().await?;
    let new_balance = apply_delta(&txn, user_id, guild_id, delta).await?;
    txn.commit().await?;
    Ok(new_balance)
}

/// Sets an account balance to an absolute amount (clamped at zero).
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn set_balance(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    amount: i64,
) -> Result<i64> {
    let txn = db.begin().await?;
    let account = load_or_create(&txn, user_id, guild_id).await?;
    let new_balance = amount.max(0);

    let mut active: account::ActiveModel = account.into();
    active.balance = Set(new_balance);
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(new_balance)
}

/// Moves tokens between two accounts in the same guild, atomically.
///
/// Rejects non-positive amounts, self-transfers, and insufficient sender
/// funds before any mutation. Debit and credit are applied in one database
/// transaction: both apply or neither does.
///
/// # Errors
/// Returns [`Error::InvalidAmount`], [`Error::SelfTransfer`], or
/// [`Error::InsufficientFunds`] on business-rule violations, or a database
/// error if a storage operation fails.
pub async fn transfer(
    db: &DatabaseConnection,
    from_user_id: &str,
    to_user_id: &str,
    guild_id: &str,
    amount: i64,
) -> Result<TransferOutcome> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }
    if from_user_id == to_user_id {
        return Err(Error::SelfTransfer);
    }

    let txn = db.begin().await?;

    let sender_balance = get_balance(&txn, from_user_id, guild_id).await?;
    if sender_balance < amount {
        return Err(Error::InsufficientFunds {
            balance: sender_balance,
            required: amount,
        });
    }

    let sender_balance = apply_delta(&txn, from_user_id, guild_id, -amount).await?;
    let recipient_balance = apply_delta(&txn, to_user_id, guild_id, amount).await?;

    txn.commit().await?;

    Ok(TransferOutcome {
        sender_balance,
        recipient_balance,
    })
}

/// Returns the richest accounts in a guild, ordered by balance descending.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_leaderboard(
    db: &DatabaseConnection,
    guild_id: &str,
    limit: u64,
) -> Result<Vec<account::Model>> {
    Account::find()
        .filter(account::Column::GuildId.eq(guild_id))
        .order_by_desc(account::Column::Balance)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

fn remaining_in_window(last: Option<DateTimeUtc>, window: Duration) -> Option<Duration> {
    let elapsed = Utc::now() - last?;
    if elapsed >= window {
        None
    } else {
        Some(window - elapsed)
    }
}

/// Time left until the daily reward can be claimed again; `None` if it is
/// claimable now (or was never claimed).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn daily_cooldown_remaining<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
    window: Duration,
) -> Result<Option<Duration>>
where
    C: ConnectionTrait,
{
    let account = find_account(db, user_id, guild_id).await?;
    Ok(remaining_in_window(
        account.and_then(|a| a.last_daily),
        window,
    ))
}

/// True if the daily reward is claimable for this account.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn can_claim_daily<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
    window: Duration,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(daily_cooldown_remaining(db, user_id, guild_id, window)
        .await?
        .is_none())
}

/// Stamps the daily claim time to now.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn record_daily_claim<C>(db: &C, user_id: &str, guild_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let account = load_or_create(db, user_id, guild_id).await?;
    let mut active: account::ActiveModel = account.into();
    active.last_daily = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

/// Time left until this user may start another quiz; `None` if allowed now.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn quiz_cooldown_remaining<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
    window: Duration,
) -> Result<Option<Duration>>
where
    C: ConnectionTrait,
{
    let account = find_account(db, user_id, guild_id).await?;
    Ok(remaining_in_window(
        account.and_then(|a| a.last_quiz),
        window,
    ))
}

/// True if this user may start a quiz in this guild.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn can_start_quiz<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
    window: Duration,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(quiz_cooldown_remaining(db, user_id, guild_id, window)
        .await?
        .is_none())
}

/// Stamps the quiz cooldown to now. Applied to the quiz **starter** when a
/// session resolves with a winner, never to the winner.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn record_quiz_cooldown<C>(db: &C, user_id: &str, guild_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let account = load_or_create(db, user_id, guild_id).await?;
    let mut active: account::ActiveModel = account.into();
    active.last_quiz = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_get_balance_missing_account_is_zero() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(get_balance(&db, "u1", "g1").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_balance_creates_account() -> Result<()> {
        let db = setup_test_db().await?;
        let balance = adjust_balance(&db, "u1", "g1", 500).await?;
        assert_eq!(balance, 500);
        assert_eq!(get_balance(&db, "u1", "g1").await?, 500);
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_balance_clamps_at_zero() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "u1", "g1", 300).await?;

        // Debit larger than the balance zeroes the account
        let balance = adjust_balance(&db, "u1", "g1", -1_000).await?;
        assert_eq!(balance, 0);
        assert_eq!(get_balance(&db, "u1", "g1").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_balance_never_negative_over_any_sequence() -> Result<()> {
        let db = setup_test_db().await?;
        for delta in [100, -5_000, 250, -1, -1, 42, -10_000, 7] {
            let balance = adjust_balance(&db, "u1", "g1", delta).await?;
            assert!(balance >= 0);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_set_balance() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(set_balance(&db, "u1", "g1", 1_000_000).await?, 1_000_000);
        assert_eq!(set_balance(&db, "u1", "g1", -5).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_balances_are_scoped_per_guild() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "u1", "g1", 100).await?;
        assert_eq!(get_balance(&db, "u1", "g2").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_moves_exact_amount() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "alice", "g1", 1_000).await?;
        adjust_balance(&db, "bob", "g1", 200).await?;

        let outcome = transfer(&db, "alice", "bob", "g1", 300).await?;
        assert_eq!(outcome.sender_balance, 700);
        assert_eq!(outcome.recipient_balance, 500);

        // Total across both accounts is conserved
        let total = get_balance(&db, "alice", "g1").await? + get_balance(&db, "bob", "g1").await?;
        assert_eq!(total, 1_200);
        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_rejects_non_positive_amount() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "alice", "g1", 1_000).await?;

        let result = transfer(&db, "alice", "bob", "g1", 0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: 0 })));

        let result = transfer(&db, "alice", "bob", "g1", -50).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -50 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_rejects_self_transfer() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "alice", "g1", 1_000).await?;

        let result = transfer(&db, "alice", "alice", "g1", 100).await;
        assert!(matches!(result, Err(Error::SelfTransfer)));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_transfer_mutates_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "alice", "g1", 100).await?;
        adjust_balance(&db, "bob", "g1", 50).await?;

        let result = transfer(&db, "alice", "bob", "g1", 500).await;
        assert!(matches!(
            result,
            Err(Error::InsufficientFunds {
                balance: 100,
                required: 500
            })
        ));

        assert_eq!(get_balance(&db, "alice", "g1").await?, 100);
        assert_eq!(get_balance(&db, "bob", "g1").await?, 50);
        Ok(())
    }

    #[tokio::test]
    async fn test_leaderboard_orders_by_balance() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "poor", "g1", 10).await?;
        adjust_balance(&db, "rich", "g1", 10_000).await?;
        adjust_balance(&db, "middle", "g1", 500).await?;
        adjust_balance(&db, "elsewhere", "g2", 99_999).await?;

        let top = get_leaderboard(&db, "g1", 2).await?;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].user_id, "rich");
        assert_eq!(top[1].user_id, "middle");
        Ok(())
    }

    #[tokio::test]
    async fn test_daily_cooldown_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let window = Duration::hours(24);

        // Never claimed: claimable
        assert!(can_claim_daily(&db, "u1", "g1", window).await?);

        record_daily_claim(&db, "u1", "g1").await?;
        assert!(!can_claim_daily(&db, "u1", "g1", window).await?);
        let remaining = daily_cooldown_remaining(&db, "u1", "g1", window)
            .await?
            .unwrap();
        assert!(remaining <= window);

        // Backdating past the window makes it claimable again
        backdate_daily_claim(&db, "u1", "g1", 25).await?;
        assert!(can_claim_daily(&db, "u1", "g1", window).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_quiz_cooldown_window_is_configurable() -> Result<()> {
        let db = setup_test_db().await?;
        record_quiz_cooldown(&db, "u1", "g1").await?;
        backdate_quiz_cooldown(&db, "u1", "g1", 2).await?;

        // 2 hours elapsed: inside a 3-hour window, outside a 1-hour one
        assert!(!can_start_quiz(&db, "u1", "g1", Duration::hours(3)).await?);
        assert!(can_start_quiz(&db, "u1", "g1", Duration::hours(1)).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_cooldown_stamps_preserve_balance() -> Result<()> {
        let db = setup_test_db().await?;
        adjust_balance(&db, "u1", "g1", 777).await?;
        record_daily_claim(&db, "u1", "g1").await?;
        record_quiz_cooldown(&db, "u1", "g1").await?;
        assert_eq!(get_balance(&db, "u1", "g1").await?, 777);
        Ok(())
    }
}
