//! Inventory item entity - Items a user owns in a guild.
//!
//! One row per (user, guild, category, item). Repeat purchases increment
//! the quantity; items are never removed once owned.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Discord user ID of the owner
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Discord guild ID scoping the ownership
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    /// Catalog category the item belongs to (e.g. "pets", "artifacts")
    #[sea_orm(primary_key, auto_increment = false)]
    pub category: String,
    /// Canonical item name as it appears in the shop catalog
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// How many of this item the user owns, always >= 1
    pub quantity: i32,
}

/// Inventory items have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
