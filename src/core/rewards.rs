//! Reward engine - Randomized payouts modified by owned items.
//!
//! This module computes daily rewards, coin-flip wagers, work payouts, and
//! shop purchases. Every business rule is checked before any mutation, and
//! multi-step mutations (credit + cooldown stamp, debit + inventory add) run
//! inside one database transaction. All sampling goes through an injected
//! `Rng` so tests can fix outcomes deterministically.

use crate::{
    config::economy::EconomySettings,
    core::{
        inventory, ledger,
        shop::{ItemEffect, ShopCatalog},
    },
    errors::{Error, Result},
};
use chrono::Duration;
use rand::Rng;
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Outcome of a successful daily claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReward {
    /// Randomized base amount
    pub base: i64,
    /// Per-pet bonus breakdown: (item name, bonus amount)
    pub bonuses: Vec<(String, i64)>,
    /// Base plus all bonuses
    pub total: i64,
    /// Balance after the credit
    pub new_balance: i64,
}

/// Outcome of a coin-flip wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipOutcome {
    /// Whether the flip was won
    pub won: bool,
    /// The wagered stake
    pub stake: i64,
    /// Amount refunded on a loss by an insurance artifact, 0 otherwise
    pub refund: i64,
    /// Balance after settling the wager
    pub new_balance: i64,
}

/// Outcome of a successful shop purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// Canonical category key
    pub category: String,
    /// Canonical item name
    pub item_name: String,
    /// Price paid
    pub price: i64,
    /// Balance after the debit
    pub new_balance: i64,
}

/// Outcome of a work shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkReward {
    /// Amount earned
    pub amount: i64,
    /// Balance after the credit
    pub new_balance: i64,
}

/// Flip modifiers derived from a user's inventory.
#[derive(Debug, Default, Clone, Copy)]
struct FlipModifiers {
    guaranteed_win: bool,
    luck_boost: u32,
    refund_percent: u32,
}

async fn flip_modifiers(
    db: &DatabaseConnection,
    catalog: &ShopCatalog,
    user_id: &str,
    guild_id: &str,
) -> Result<FlipModifiers> {
    let mut modifiers = FlipModifiers::default();

    for entry in inventory::list_items(db, user_id, guild_id).await? {
        let effect = catalog
            .find_item(&entry.category, &entry.name)
            .and_then(|item| item.effect);
        match effect {
            Some(ItemEffect::GuaranteedFlipWin) => modifiers.guaranteed_win = true,
            Some(ItemEffect::FlipLuckBoost { percent }) => {
                modifiers.luck_boost = modifiers.luck_boost.max(percent);
            }
            Some(ItemEffect::LossRefund { percent }) => {
                modifiers.refund_percent = modifiers.refund_percent.max(percent);
            }
            Some(ItemEffect::DailyBonus { .. }) | None => {}
        }
    }

    Ok(modifiers)
}

/// Claims the daily reward: a randomized base amount plus the flat bonus of
/// every owned pet. Credits the ledger and stamps the claim time in one
/// transaction.
///
/// # Errors
/// Returns [`Error::CooldownActive`] if called inside the daily window, or a
/// database error if a storage operation fails.
pub async fn claim_daily(
    db: &DatabaseConnection,
    settings: &EconomySettings,
    catalog: &ShopCatalog,
    rng: &mut impl Rng,
    user_id: &str,
    guild_id: &str,
) -> Result<DailyReward> {
    let window = Duration::hours(settings.daily_cooldown_hours);
    if let Some(remaining) =
        ledger::daily_cooldown_remaining(db, user_id, guild_id, window).await?
    {
        return Err(Error::CooldownActive {
            remaining_secs: remaining.num_seconds().max(1),
        });
    }

    let mut bonuses = Vec::new();
    for entry in inventory::list_items(db, user_id, guild_id).await? {
        if let Some(ItemEffect::DailyBonus { amount }) = catalog
            .find_item(&entry.category, &entry.name)
            .and_then(|item| item.effect)
        {
            bonuses.push((entry.name, amount));
        }
    }

    let base = rng.random_range(settings.daily_min..=settings.daily_max);
    let total = base + bonuses.iter().map(|(_, amount)| amount).sum::<i64>();

    let txn = db.begin().await?;
    let new_balance = ledger::apply_delta(&txn, user_id, guild_id, total).await?;
    ledger::record_daily_claim(&txn, user_id, guild_id).await?;
    txn.commit().await?;

    Ok(DailyReward {
        base,
        bonuses,
        total,
        new_balance,
    })
}

/// Wagers `stake` tokens on a coin flip.
///
/// Win chance is the configured base plus any luck-boost pet, forced to a
/// win by a guaranteed-win artifact. A win credits the stake; a loss debits
/// it, refunding part of it in the same balance adjustment if an insurance
/// artifact is owned.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for a non-positive stake,
/// [`Error::InsufficientFunds`] if the stake exceeds the balance, or a
/// database error if a storage operation fails.
pub async fn wager_flip(
    db: &DatabaseConnection,
    settings: &EconomySettings,
    catalog: &ShopCatalog,
    rng: &mut impl Rng,
    user_id: &str,
    guild_id: &str,
    stake: i64,
) -> Result<FlipOutcome> {
    if stake <= 0 {
        return Err(Error::InvalidAmount { amount: stake });
    }

    let balance = ledger::get_balance(db, user_id, guild_id).await?;
    if balance < stake {
        return Err(Error::InsufficientFunds {
            balance,
            required: stake,
        });
    }

    let modifiers = flip_modifiers(db, catalog, user_id, guild_id).await?;

    let won = modifiers.guaranteed_win || {
        let win_chance = settings.flip_base_chance + modifiers.luck_boost;
        rng.random_range(1..=100) <= win_chance
    };

    let (delta, refund) = if won {
        (stake, 0)
    } else {
        let refund = stake * i64::from(modifiers.refund_percent) / 100;
        (-stake + refund, refund)
    };

    let new_balance = ledger::adjust_balance(db, user_id, guild_id, delta).await?;

    Ok(FlipOutcome {
        won,
        stake,
        refund,
        new_balance,
    })
}

/// Buys one unit of a catalog item: debits the price and adds the item to
/// the inventory in one transaction.
///
/// Category and item names are matched case-insensitively against the
/// catalog.
///
/// # Errors
/// Returns [`Error::UnknownCategory`], [`Error::ItemNotFound`], or
/// [`Error::InsufficientFunds`] on business-rule violations, or a database
/// error if a storage operation fails.
pub async fn purchase(
    db: &DatabaseConnection,
    catalog: &ShopCatalog,
    user_id: &str,
    guild_id: &str,
    category: &str,
    item_name: &str,
) -> Result<PurchaseReceipt> {
    let (category_key, _) = catalog
        .category(category)
        .ok_or_else(|| Error::UnknownCategory {
            category: category.to_string(),
        })?;
    let category_key = category_key.to_string();

    let item = catalog
        .find_item(&category_key, item_name)
        .ok_or_else(|| Error::ItemNotFound {
            category: category_key.clone(),
            name: item_name.to_string(),
        })?;

    let balance = ledger::get_balance(db, user_id, guild_id).await?;
    if balance < item.price {
        return Err(Error::InsufficientFunds {
            balance,
            required: item.price,
        });
    }

    let txn = db.begin().await?;
    let new_balance = ledger::apply_delta(&txn, user_id, guild_id, -item.price).await?;
    inventory::add_item(&txn, user_id, guild_id, &category_key, &item.name, 1).await?;
    txn.commit().await?;

    Ok(PurchaseReceipt {
        category: category_key,
        item_name: item.name.clone(),
        price: item.price,
        new_balance,
    })
}

/// Works a shift for a randomized payout. No cooldown.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn work(
    db: &DatabaseConnection,
    settings: &EconomySettings,
    rng: &mut impl Rng,
    user_id: &str,
    guild_id: &str,
) -> Result<WorkReward> {
    let amount = rng.random_range(settings.work_min..=settings.work_max);
    let new_balance = ledger::adjust_balance(db, user_id, guild_id, amount).await?;
    Ok(WorkReward {
        amount,
        new_balance,
    })
}
