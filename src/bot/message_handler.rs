//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::{debug, info};

// Import localization
use crate::localization::{t, t_args};

// Import dialogue types
use crate::dialogue::{RecipeDialogue, RecipeDialogueState};

use crate::db;
use crate::search::search_by_ingredient;
use crate::shopping_list::{build_shopping_list, MergeStrategy};
use crate::suggestion::{suggest, DEFAULT_RECENT_CUTOFF_DAYS};

// Import dialogue manager functions
use super::dialogue_manager::{
    handle_category_input, handle_difficulty_input, handle_ingredients_input,
    handle_instructions_input, handle_prep_time_input, handle_rating_input,
    handle_recipe_name_input, handle_scale_servings_input, handle_servings_input,
};

// Import UI builder functions
use super::ui_builder::{
    format_cooking_history, format_recipe_details, format_recipe_list, format_shopping_list,
};

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    conn: Arc<Mutex<Connection>>,
) -> Result<()> {
    let text = match msg.text() {
        Some(text) => text,
        None => return Ok(()),
    };

    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    // Check dialogue state first
    let dialogue_state = dialogue.get().await?;
    match dialogue_state {
        Some(RecipeDialogueState::WaitingForRecipeName) => {
            return handle_recipe_name_input(bot, msg, dialogue, conn, text).await;
        }
        Some(RecipeDialogueState::WaitingForCategory { draft }) => {
            return handle_category_input(bot, msg, dialogue, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForServings { draft }) => {
            return handle_servings_input(bot, msg, dialogue, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForIngredients { draft }) => {
            return handle_ingredients_input(bot, msg, dialogue, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForPrepTime { draft }) => {
            return handle_prep_time_input(bot, msg, dialogue, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForInstructions { draft }) => {
            return handle_instructions_input(bot, msg, dialogue, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForDifficulty { draft }) => {
            return handle_difficulty_input(bot, msg, dialogue, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForRating { draft }) => {
            return handle_rating_input(bot, msg, dialogue, conn, text, draft).await;
        }
        Some(RecipeDialogueState::WaitingForScaleServings { recipe_name }) => {
            return handle_scale_servings_input(bot, msg, dialogue, conn, text, recipe_name).await;
        }
        Some(RecipeDialogueState::Start) | None => {
            // Continue with normal command handling
        }
    }

    // Handle /start command
    if text == "/start" {
        let welcome_message = format!(
            "👋 {}\n\n{}\n\n{}",
            t("welcome-title"),
            t("welcome-description"),
            t("help-commands")
        );
        bot.send_message(msg.chat.id, welcome_message).await?;
    }
    // Handle /help command
    else if text == "/help" {
        let help_message = format!(
            "{}\n\n{}\n\n{}",
            t("help-title"),
            t("help-description"),
            t("help-commands")
        );
        bot.send_message(msg.chat.id, help_message).await?;
    }
    // Handle /add command - starts the add-recipe dialogue
    else if text == "/add" {
        bot.send_message(msg.chat.id, t("add-name-prompt")).await?;
        dialogue.update(RecipeDialogueState::WaitingForRecipeName).await?;
    }
    // Handle /recipes command
    else if text == "/recipes" {
        handle_list_command(bot, msg.chat.id, conn).await?;
    }
    // Handle /random command
    else if text == "/random" {
        handle_random_command(bot, msg.chat.id, conn).await?;
    }
    // Handle /cancel outside a dialogue
    else if text == "/cancel" {
        bot.send_message(msg.chat.id, t("cancel-nothing")).await?;
    }
    // Commands with arguments
    else if let Some(name) = text.strip_prefix("/view ") {
        handle_view_command(bot, msg.chat.id, conn, name).await?;
    } else if let Some(query) = text.strip_prefix("/search ") {
        handle_search_command(bot, msg.chat.id, conn, query).await?;
    } else if let Some(name) = text.strip_prefix("/scale ") {
        handle_scale_command(bot, msg.chat.id, dialogue, conn, name).await?;
    } else if let Some(args) = text.strip_prefix("/cooked ") {
        handle_cooked_command(bot, msg.chat.id, conn, args).await?;
    } else if let Some(names) = text.strip_prefix("/shoppinglist_simple ") {
        handle_shopping_list_command(bot, msg.chat.id, conn, names, MergeStrategy::Deduplicated)
            .await?;
    } else if let Some(names) = text.strip_prefix("/shoppinglist ") {
        handle_shopping_list_command(bot, msg.chat.id, conn, names, MergeStrategy::Summed).await?;
    }
    // Argument-less forms of commands that need arguments
    else if matches!(
        text,
        "/view" | "/search" | "/scale" | "/cooked" | "/shoppinglist" | "/shoppinglist_simple"
    ) {
        bot.send_message(msg.chat.id, t("command-usage")).await?;
    }
    // Handle regular text messages
    else {
        bot.send_message(msg.chat.id, t("fallback-hint")).await?;
    }

    Ok(())
}

/// List the whole catalog
async fn handle_list_command(bot: &Bot, chat_id: ChatId, conn: Arc<Mutex<Connection>>) -> Result<()> {
    let recipes = {
        let conn = conn.lock().await;
        db::list_recipes(&conn)?
    };

    if recipes.is_empty() {
        bot.send_message(chat_id, t("no-recipes")).await?;
    } else {
        let listing = format!("{}\n\n{}", t("recipes-title"), format_recipe_list(&recipes));
        bot.send_message(chat_id, listing).await?;
    }

    Ok(())
}

/// Show one recipe's details and cooking history
async fn handle_view_command(
    bot: &Bot,
    chat_id: ChatId,
    conn: Arc<Mutex<Connection>>,
    name: &str,
) -> Result<()> {
    let recipe = {
        let conn = conn.lock().await;
        db::get_recipe_by_name(&conn, name)?
    };

    match recipe {
        Some(recipe) => {
            let details = format!(
                "{}\n\n{}",
                format_recipe_details(&recipe),
                format_cooking_history(&recipe)
            );
            bot.send_message(chat_id, details).await?;
        }
        None => {
            bot.send_message(chat_id, t_args("recipe-not-found", &[("name", name.trim())]))
                .await?;
        }
    }

    Ok(())
}

/// Search recipes by ingredient substring
async fn handle_search_command(
    bot: &Bot,
    chat_id: ChatId,
    conn: Arc<Mutex<Connection>>,
    query: &str,
) -> Result<()> {
    let recipes = {
        let conn = conn.lock().await;
        db::list_recipes(&conn)?
    };

    let found = search_by_ingredient(&recipes, query);

    if found.is_empty() {
        bot.send_message(
            chat_id,
            t_args("search-no-results", &[("ingredient", query.trim())]),
        )
        .await?;
    } else {
        let names: Vec<String> = found.iter().map(|recipe| recipe.name.clone()).collect();
        let message = format!(
            "{}\n{}",
            t_args(
                "search-results",
                &[
                    ("ingredient", query.trim()),
                    ("count", &found.len().to_string()),
                ],
            ),
            names
                .iter()
                .map(|name| format!("• {}", name))
                .collect::<Vec<_>>()
                .join("\n")
        );
        bot.send_message(chat_id, message).await?;
    }

    Ok(())
}

/// Start the scale dialogue for a recipe
async fn handle_scale_command(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: RecipeDialogue,
    conn: Arc<Mutex<Connection>>,
    name: &str,
) -> Result<()> {
    let recipe = {
        let conn = conn.lock().await;
        db::get_recipe_by_name(&conn, name)?
    };

    match recipe {
        Some(recipe) => {
            bot.send_message(
                chat_id,
                t_args(
                    "scale-servings-prompt",
                    &[
                        ("name", recipe.name.as_str()),
                        ("servings", &recipe.servings.to_string()),
                    ],
                ),
            )
            .await?;
            dialogue
                .update(RecipeDialogueState::WaitingForScaleServings {
                    recipe_name: recipe.name,
                })
                .await?;
        }
        None => {
            bot.send_message(chat_id, t_args("recipe-not-found", &[("name", name.trim())]))
                .await?;
        }
    }

    Ok(())
}

/// Suggest a random recipe not cooked recently
async fn handle_random_command(
    bot: &Bot,
    chat_id: ChatId,
    conn: Arc<Mutex<Connection>>,
) -> Result<()> {
    let recipes = {
        let conn = conn.lock().await;
        db::list_recipes(&conn)?
    };

    let today = Local::now().date_naive();
    match suggest(&recipes, today, DEFAULT_RECENT_CUTOFF_DAYS) {
        Some(recipe) => {
            info!(name = %recipe.name, "Suggesting recipe");
            let message = format!("{}\n\n{}", t("random-title"), format_recipe_details(recipe));
            bot.send_message(chat_id, message).await?;
        }
        None => {
            bot.send_message(chat_id, t("no-recipes")).await?;
        }
    }

    Ok(())
}

/// Log a cooking date: `/cooked <name> [YYYY-MM-DD]`, defaulting to today
async fn handle_cooked_command(
    bot: &Bot,
    chat_id: ChatId,
    conn: Arc<Mutex<Connection>>,
    args: &str,
) -> Result<()> {
    let args = args.trim();
    let today = Local::now().date_naive();

    // A trailing ISO date is the optional date argument; everything else is
    // part of the recipe name
    let (name, date) = match args.rsplit_once(char::is_whitespace) {
        Some((head, tail)) => match NaiveDate::parse_from_str(tail, "%Y-%m-%d") {
            Ok(date) => (head.trim(), date),
            Err(_) => (args, today),
        },
        None => (args, today),
    };

    if date > today {
        bot.send_message(chat_id, t("cooked-future-date")).await?;
        return Ok(());
    }

    let logged = {
        let conn = conn.lock().await;
        db::append_cooking_date(&conn, name, date)?
    };

    if logged {
        bot.send_message(
            chat_id,
            t_args(
                "cooked-logged",
                &[("name", name), ("date", &date.to_string())],
            ),
        )
        .await?;
    } else {
        bot.send_message(chat_id, t_args("recipe-not-found", &[("name", name)]))
            .await?;
    }

    Ok(())
}

/// Build a combined shopping list from comma-separated recipe names
async fn handle_shopping_list_command(
    bot: &Bot,
    chat_id: ChatId,
    conn: Arc<Mutex<Connection>>,
    names: &str,
    strategy: MergeStrategy,
) -> Result<()> {
    let requested: Vec<&str> = names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    if requested.is_empty() {
        bot.send_message(chat_id, t("command-usage")).await?;
        return Ok(());
    }

    let mut lists: Vec<String> = Vec::new();
    let mut missing: Vec<&str> = Vec::new();
    {
        let conn = conn.lock().await;
        for name in &requested {
            match db::get_recipe_by_name(&conn, name)? {
                Some(recipe) => lists.push(recipe.ingredients),
                None => missing.push(name),
            }
        }
    }

    if lists.is_empty() {
        bot.send_message(
            chat_id,
            t_args("recipe-not-found", &[("name", &missing.join(", "))]),
        )
        .await?;
        return Ok(());
    }

    let lines = build_shopping_list(&lists, strategy);
    let mut message = format_shopping_list(&lines);

    if !missing.is_empty() {
        message.push_str(&format!(
            "\n\n{}",
            t_args("shopping-list-missing", &[("names", &missing.join(", "))])
        ));
    }

    bot.send_message(chat_id, message).await?;

    Ok(())
}

async fn handle_unsupported_message(bot: &Bot, msg: &Message) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Received unsupported message type from user");

    bot.send_message(msg.chat.id, t("unsupported-message")).await?;
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    conn: Arc<Mutex<Connection>>,
    dialogue: RecipeDialogue,
) -> Result<()> {
    if msg.text().is_some() {
        handle_text_message(&bot, &msg, dialogue, conn).await?;
    } else {
        handle_unsupported_message(&bot, &msg).await?;
    }

    Ok(())
}
