//! Inventory business logic - Owned items per user and guild.
//!
//! Purchases create entries and repeat purchases increment the quantity.
//! There is no removal operation: item effects are permanent perks, checked
//! for presence but never consumed.

use crate::{
    entities::{InventoryItem, inventory_item},
    errors::Result,
};
use sea_orm::{ConnectionTrait, Set, prelude::*};

/// Adds `quantity` units of an item to a user's inventory, creating the
/// entry if it does not exist yet. Returns the updated entry.
///
/// # Errors
/// Returns an error if a database operation fails.
pub async fn add_item<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
    category: &str,
    name: &str,
    quantity: i32,
) -> Result<inventory_item::Model>
where
    C: ConnectionTrait,
{
    let existing = InventoryItem::find_by_id((
        user_id.to_string(),
        guild_id.to_string(),
        category.to_string(),
        name.to_string(),
    ))
    .one(db)
    .await?;

    match existing {
        Some(entry) => {
            let new_quantity = entry.quantity.saturating_add(quantity);
            let mut active: inventory_item::ActiveModel = entry.into();
            active.quantity = Set(new_quantity);
            active.update(db).await.map_err(Into::into)
        }
        None => inventory_item::ActiveModel {
            user_id: Set(user_id.to_string()),
            guild_id: Set(guild_id.to_string()),
            category: Set(category.to_string()),
            name: Set(name.to_string()),
            quantity: Set(quantity),
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

/// Lists everything a user owns in a guild.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_items<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
) -> Result<Vec<inventory_item::Model>>
where
    C: ConnectionTrait,
{
    InventoryItem::find()
        .filter(inventory_item::Column::UserId.eq(user_id))
        .filter(inventory_item::Column::GuildId.eq(guild_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// True if the user owns at least one unit of the given item.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn has_item<C>(
    db: &C,
    user_id: &str,
    guild_id: &str,
    category: &str,
    name: &str,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let entry = InventoryItem::find_by_id((
        user_id.to_string(),
        guild_id.to_string(),
        category.to_string(),
        name.to_string(),
    ))
    .one(db)
    .await?;

    Ok(entry.is_some_and(|e| e.quantity > 0))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_item_creates_entry() -> Result<()> {
        let db = setup_test_db().await?;

        let entry = add_item(&db, "u1", "g1", "pets", "Golden Dragon", 1).await?;
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.name, "Golden Dragon");

        assert!(has_item(&db, "u1", "g1", "pets", "Golden Dragon").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_repeat_purchase_increments_quantity() -> Result<()> {
        let db = setup_test_db().await?;

        add_item(&db, "u1", "g1", "artifacts", "Insurance", 1).await?;
        let entry = add_item(&db, "u1", "g1", "artifacts", "Insurance", 1).await?;
        assert_eq!(entry.quantity, 2);

        let items = list_items(&db, "u1", "g1").await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_items_scoped_to_user_and_guild() -> Result<()> {
        let db = setup_test_db().await?;

        add_item(&db, "u1", "g1", "pets", "Phoenix", 1).await?;
        add_item(&db, "u1", "g1", "titles", "The Lucky", 1).await?;
        add_item(&db, "u2", "g1", "pets", "Phoenix", 1).await?;
        add_item(&db, "u1", "g2", "pets", "Phoenix", 1).await?;

        let items = list_items(&db, "u1", "g1").await?;
        assert_eq!(items.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_has_item_missing_is_false() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(!has_item(&db, "u1", "g1", "artifacts", "Lucky Coin").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_name_in_different_categories() -> Result<()> {
        let db = setup_test_db().await?;

        add_item(&db, "u1", "g1", "roles", "High Roller", 1).await?;
        assert!(!has_item(&db, "u1", "g1", "titles", "High Roller").await?);
        Ok(())
    }
}
