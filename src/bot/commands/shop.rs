//! Shop Discord commands - browsing, buying, and the inventory display.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{format_tokens, require_guild, title_case},
        },
        core::{inventory, rewards},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::collections::BTreeMap;
    use std::fmt::Write;

    /// Browses the token shop, either the category index or one category.
    #[poise::command(slash_command, prefix_command)]
    pub async fn shop(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category to browse"] category: Option<String>,
    ) -> Result<()> {
        let catalog = &ctx.data().catalog;

        let Some(category) = category else {
            let mut categories = String::new();
            for name in catalog.category_names() {
                writeln!(&mut categories, "• `/shop {name}`")?;
            }

            let embed = serenity::CreateEmbed::default()
                .title("🛒 Token Shop")
                .description("Welcome to the token shop! Choose a category:")
                .color(0x009C_27B0)
                .field("📋 Categories", categories, false)
                .footer(serenity::CreateEmbedFooter::new(
                    "Use /buy <category> <item> to purchase items",
                ));
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        };

        let Some((category_key, items)) = catalog.category(&category) else {
            ctx.say("❌ Invalid category! Use `/shop` to see available categories.")
                .await?;
            return Ok(());
        };

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("🛒 {} Shop", title_case(category_key)))
            .color(0x009C_27B0)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Use /buy {category_key} <item name> to purchase"
            )));

        for item in items {
            embed = embed.field(
                &item.name,
                format!("**{}**\n{}", format_tokens(item.price), item.description),
                true,
            );
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Buys an item from the shop.
    #[poise::command(slash_command, prefix_command)]
    pub async fn buy(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Shop category"] category: String,
        #[description = "Item name"]
        #[rest]
        item: String,
    ) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let result = rewards::purchase(
            &data.database,
            &data.catalog,
            &user_id,
            &guild_id,
            &category,
            &item,
        )
        .await;

        match result {
            Ok(receipt) => {
                let embed = serenity::CreateEmbed::default()
                    .title("✅ Purchase Successful!")
                    .description(format!(
                        "You bought **{}** for **{}**!",
                        receipt.item_name,
                        format_tokens(receipt.price)
                    ))
                    .color(0x004C_AF50)
                    .field(
                        "Remaining Balance",
                        format_tokens(receipt.new_balance),
                        false,
                    );
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
            }
            Err(Error::UnknownCategory { .. }) => {
                ctx.say("❌ Invalid category! Use `/shop` to see available categories.")
                    .await?;
            }
            Err(Error::ItemNotFound { category, name }) => {
                ctx.say(format!(
                    "❌ Item '{name}' not found in the {category} category!"
                ))
                .await?;
            }
            Err(Error::InsufficientFunds { balance, required }) => {
                ctx.say(format!(
                    "❌ You need **{}** but only have **{}**!",
                    format_tokens(required),
                    format_tokens(balance)
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Shows a user's inventory, grouped by category.
    #[poise::command(slash_command, prefix_command, aliases("inv"))]
    pub async fn inventory(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to inspect (defaults to you)"] user: Option<serenity::User>,
    ) -> Result<()> {
        let Some(guild_id) = require_guild(ctx).await? else {
            return Ok(());
        };

        let target = user.as_ref().unwrap_or_else(|| ctx.author());
        let items =
            inventory::list_items(&ctx.data().database, &target.id.to_string(), &guild_id).await?;

        if items.is_empty() {
            let embed = serenity::CreateEmbed::default()
                .title(format!("📦 {}'s Inventory", target.name))
                .description("Inventory is empty!")
                .color(0x0060_7D8B);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        }

        let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for item in items {
            let label = if item.quantity > 1 {
                format!("{} (x{})", item.name, item.quantity)
            } else {
                item.name
            };
            by_category.entry(item.category).or_default().push(label);
        }

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("📦 {}'s Inventory", target.name))
            .color(0x0060_7D8B);
        for (category, labels) in by_category {
            embed = embed.field(title_case(&category), labels.join("\n"), true);
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
