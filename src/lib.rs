//! # Recipe Book Telegram Bot
//!
//! A personal recipe catalog with a text-to-quantity engine at its core:
//! free-form ingredient tokens are parsed into numeric amounts, scaled to a
//! desired serving count, and merged across recipes into a shopping list.
//! Recipes are stored in SQLite and served over a Telegram bot.

pub mod bot;
pub mod db;
pub mod dialogue;
pub mod localization;
pub mod quantity;
pub mod recipe;
pub mod scaling;
pub mod search;
pub mod shopping_list;
pub mod suggestion;
