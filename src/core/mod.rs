//! Core business logic - framework-agnostic economy operations.
//!
//! Nothing in here knows about Discord: the bot layer translates commands
//! into calls against these modules and renders the results.

/// Owned-item storage and presence checks
pub mod inventory;
/// Balances, cooldown stamps, transfers, and the leaderboard
pub mod ledger;
/// Live trivia sessions and the question pool
pub mod quiz;
/// Randomized payouts: daily, coin flips, work, purchases
pub mod rewards;
/// The static item catalog and its effects
pub mod shop;
