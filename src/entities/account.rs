//! Account entity - Per-user, per-guild token balance and cooldown record.
//!
//! An account is created lazily the first time a user's balance or cooldown
//! state is touched in a guild, and is never deleted. The balance is kept
//! non-negative by the ledger layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Discord user ID this account belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Discord guild ID scoping this account
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    /// Current token balance, always >= 0
    pub balance: i64,
    /// When the daily reward was last claimed, None if never
    pub last_daily: Option<DateTimeUtc>,
    /// When this user last started a quiz that resolved with a winner, None if never
    pub last_quiz: Option<DateTimeUtc>,
}

/// Accounts have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
