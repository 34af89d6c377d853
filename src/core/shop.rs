//! Shop catalog - The static set of purchasable items and their effects.
//!
//! The catalog is built once at startup and never mutated. Category and item
//! lookups are case-insensitive: category keys are normalized to lowercase at
//! construction and item names are compared ignoring ASCII case, so `!buy
//! artifacts lucky coin` resolves to the canonical "Lucky Coin" entry.

use std::collections::BTreeMap;

/// Gameplay effect granted by owning an item.
///
/// Effects are checked for presence, never consumed; an owned item keeps
/// granting its effect indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Flat bonus added to every daily reward claim
    DailyBonus {
        /// Tokens added per claim
        amount: i64,
    },
    /// Extra win chance on coin flips, in percent
    FlipLuckBoost {
        /// Percentage points added to the base win chance
        percent: u32,
    },
    /// Every coin flip is a guaranteed win
    GuaranteedFlipWin,
    /// Part of a lost stake is refunded
    LossRefund {
        /// Percent of the stake refunded on a loss
        percent: u32,
    },
}

/// A single purchasable item.
#[derive(Debug, Clone)]
pub struct ShopItem {
    /// Canonical display name
    pub name: String,
    /// Price in tokens, positive
    pub price: i64,
    /// Short description shown in the shop listing
    pub description: String,
    /// Gameplay effect, if any; purely cosmetic items have none
    pub effect: Option<ItemEffect>,
}

impl ShopItem {
    fn new(name: &str, price: i64, description: &str, effect: Option<ItemEffect>) -> Self {
        Self {
            name: name.to_string(),
            price,
            description: description.to_string(),
            effect,
        }
    }
}

/// The immutable shop catalog, keyed by lowercase category name.
#[derive(Debug, Clone)]
pub struct ShopCatalog {
    categories: BTreeMap<String, Vec<ShopItem>>,
}

impl ShopCatalog {
    /// Builds the standard catalog: prestige roles, profile titles, pets
    /// with daily bonuses, and artifacts that modify wagering odds.
    #[must_use]
    pub fn standard() -> Self {
        let mut categories = BTreeMap::new();

        categories.insert(
            "roles".to_string(),
            vec![
                ShopItem::new(
                    "High Roller",
                    500_000,
                    "Gives you a special role to show off your wealth.",
                    None,
                ),
                ShopItem::new(
                    "Quiz Master",
                    1_000_000,
                    "A role for those who prove their intelligence.",
                    None,
                ),
                ShopItem::new(
                    "The Millionaire",
                    2_500_000,
                    "A role that signifies you've broken the bank.",
                    None,
                ),
                ShopItem::new(
                    "The Jackpot",
                    5_000_000,
                    "The ultimate role for the luckiest players.",
                    None,
                ),
            ],
        );

        categories.insert(
            "titles".to_string(),
            vec![
                ShopItem::new("The Lucky", 100_000, "A title for the fortunate ones.", None),
                ShopItem::new(
                    "The Unlucky",
                    150_000,
                    "A title for those with bad luck.",
                    None,
                ),
                ShopItem::new(
                    "The All-In",
                    1_000_000,
                    "For those who risk everything.",
                    None,
                ),
                ShopItem::new("The Risk Taker", 750_000, "For the brave gamblers.", None),
                ShopItem::new("High Stakes", 500_000, "For high-stakes players.", None),
            ],
        );

        categories.insert(
            "pets".to_string(),
            vec![
                ShopItem::new(
                    "Rabbit's Foot",
                    200_000,
                    "Grants a small luck boost to your coin flips.",
                    Some(ItemEffect::FlipLuckBoost { percent: 5 }),
                ),
                ShopItem::new(
                    "Golden Dragon",
                    1_500_000,
                    "Grants a daily bonus of 10,000 T.",
                    Some(ItemEffect::DailyBonus { amount: 10_000 }),
                ),
                ShopItem::new(
                    "Fortune Cat",
                    3_000_000,
                    "Grants a large daily bonus of 50,000 T.",
                    Some(ItemEffect::DailyBonus { amount: 50_000 }),
                ),
                ShopItem::new(
                    "Phoenix",
                    10_000_000,
                    "Grants a massive daily bonus of 100,000 T.",
                    Some(ItemEffect::DailyBonus { amount: 100_000 }),
                ),
            ],
        );

        categories.insert(
            "artifacts".to_string(),
            vec![
                ShopItem::new(
                    "Lucky Coin",
                    50_000,
                    "Guarantees a win on your coin flips.",
                    Some(ItemEffect::GuaranteedFlipWin),
                ),
                // The high-stakes gamble game this targets was never built;
                // the item stays purchasable as a collectible.
                ShopItem::new(
                    "The Cheat",
                    250_000,
                    "Guarantees a win on your next gamble.",
                    None,
                ),
                ShopItem::new(
                    "Insurance",
                    1_000_000,
                    "Refunds your money if you lose your bet (10% refund rate).",
                    Some(ItemEffect::LossRefund { percent: 10 }),
                ),
            ],
        );

        Self { categories }
    }

    /// Looks up a category by name, case-insensitively.
    ///
    /// Returns the canonical category key and its items.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<(&str, &[ShopItem])> {
        let key = name.trim().to_lowercase();
        self.categories
            .get_key_value(&key)
            .map(|(k, items)| (k.as_str(), items.as_slice()))
    }

    /// Finds an item by category and name, both case-insensitive.
    #[must_use]
    pub fn find_item(&self, category: &str, name: &str) -> Option<&ShopItem> {
        let (_, items) = self.category(category)?;
        let wanted = name.trim();
        items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(wanted))
    }

    /// Iterates over the canonical category names in stable order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_standard_catalog_categories() {
        let catalog = ShopCatalog::standard();
        let names: Vec<&str> = catalog.category_names().collect();
        assert_eq!(names, vec!["artifacts", "pets", "roles", "titles"]);
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        let catalog = ShopCatalog::standard();
        let (key, items) = catalog.category("  Artifacts ").unwrap();
        assert_eq!(key, "artifacts");
        assert_eq!(items.len(), 3);
        assert!(catalog.category("jewels").is_none());
    }

    #[test]
    fn test_item_lookup_is_case_insensitive() {
        let catalog = ShopCatalog::standard();
        let item = catalog.find_item("ARTIFACTS", "lucky coin").unwrap();
        assert_eq!(item.name, "Lucky Coin");
        assert_eq!(item.price, 50_000);
        assert!(catalog.find_item("artifacts", "lucky charm").is_none());
    }

    #[test]
    fn test_effects_are_wired() {
        let catalog = ShopCatalog::standard();

        let phoenix = catalog.find_item("pets", "Phoenix").unwrap();
        assert_eq!(
            phoenix.effect,
            Some(ItemEffect::DailyBonus { amount: 100_000 })
        );

        let coin = catalog.find_item("artifacts", "Lucky Coin").unwrap();
        assert_eq!(coin.effect, Some(ItemEffect::GuaranteedFlipWin));

        let insurance = catalog.find_item("artifacts", "Insurance").unwrap();
        assert_eq!(insurance.effect, Some(ItemEffect::LossRefund { percent: 10 }));

        let foot = catalog.find_item("pets", "Rabbit's Foot").unwrap();
        assert_eq!(foot.effect, Some(ItemEffect::FlipLuckBoost { percent: 5 }));
    }

    #[test]
    fn test_all_prices_positive() {
        let catalog = ShopCatalog::standard();
        for name in ["roles", "titles", "pets", "artifacts"] {
            let (_, items) = catalog.category(name).unwrap();
            assert!(items.iter().all(|item| item.price > 0));
        }
    }
}
