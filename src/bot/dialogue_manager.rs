//! Dialogue Manager module for handling dialogue state transitions

use anyhow::Result;
use rusqlite::Connection;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::{error, info};

// Import localization
use crate::localization::{t, t_args};

// Import dialogue types
use crate::dialogue::{validate_recipe_name, RecipeDialogue, RecipeDialogueState, RecipeDraft};

use crate::db;
use crate::quantity::has_negative_quantity;
use crate::recipe::{clean_ingredient_list, Recipe};
use crate::scaling::scale_ingredients;

// Import UI builder functions
use super::ui_builder::{
    create_category_keyboard, create_difficulty_keyboard, format_scaled_ingredients,
};

/// Words that abort a dialogue from any step
fn is_cancellation(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "cancel" | "stop" | "back" | "/cancel"
    )
}

async fn cancel_dialogue(bot: &Bot, msg: &Message, dialogue: &RecipeDialogue) -> Result<()> {
    bot.send_message(msg.chat.id, t("add-cancelled")).await?;
    dialogue.exit().await?;
    Ok(())
}

/// Handle recipe name input during the add-recipe dialogue
pub async fn handle_recipe_name_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    conn: Arc<Mutex<Connection>>,
    input: &str,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    // Validate recipe name
    match validate_recipe_name(input) {
        Ok(validated_name) => {
            // Recipe names are unique in the catalog
            let taken = {
                let conn = conn.lock().await;
                db::recipe_name_exists(&conn, &validated_name)?
            };

            if taken {
                bot.send_message(
                    msg.chat.id,
                    t_args("recipe-name-taken", &[("name", &validated_name)]),
                )
                .await?;
                return Ok(());
            }

            let draft = RecipeDraft {
                name: validated_name,
                ..Default::default()
            };

            bot.send_message(msg.chat.id, t("add-category-prompt"))
                .reply_markup(create_category_keyboard())
                .await?;

            dialogue
                .update(RecipeDialogueState::WaitingForCategory { draft })
                .await?;
        }
        Err("too_long") => {
            bot.send_message(msg.chat.id, t("recipe-name-too-long")).await?;
            // Keep dialogue active, user can try again
        }
        Err("numeric") => {
            bot.send_message(msg.chat.id, t("recipe-name-numeric")).await?;
            // Keep dialogue active, user can try again
        }
        Err(_) => {
            bot.send_message(msg.chat.id, t("recipe-name-invalid")).await?;
            // Keep dialogue active, user can try again
        }
    }

    Ok(())
}

/// Handle a typed category during the add-recipe dialogue.
///
/// The inline keyboard is the normal path; typing a custom category is also
/// accepted since stored categories are free-form.
pub async fn handle_category_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    input: &str,
    mut draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    let category = input.trim();
    if category.is_empty() {
        bot.send_message(msg.chat.id, t("category-invalid")).await?;
        return Ok(());
    }

    draft.category = category.to_string();
    advance_to_servings(bot, msg.chat.id, &dialogue, draft).await
}

/// Move the dialogue to the serving-count step; shared by the typed-category
/// and keyboard-category paths
pub async fn advance_to_servings(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &RecipeDialogue,
    draft: RecipeDraft,
) -> Result<()> {
    bot.send_message(chat_id, t("add-servings-prompt")).await?;
    dialogue
        .update(RecipeDialogueState::WaitingForServings { draft })
        .await?;
    Ok(())
}

/// Handle the serving count during the add-recipe dialogue
pub async fn handle_servings_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    input: &str,
    mut draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    match input.trim().parse::<u32>() {
        Ok(servings) if servings >= 1 => {
            draft.servings = servings;
            bot.send_message(msg.chat.id, t("add-ingredients-prompt")).await?;
            dialogue
                .update(RecipeDialogueState::WaitingForIngredients { draft })
                .await?;
        }
        _ => {
            bot.send_message(msg.chat.id, t("invalid-servings")).await?;
            // Keep dialogue active, user can try again
        }
    }

    Ok(())
}

/// Handle the ingredient list during the add-recipe dialogue
pub async fn handle_ingredients_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    input: &str,
    mut draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    let cleaned = clean_ingredient_list(input);
    if cleaned.is_empty() {
        bot.send_message(msg.chat.id, t("ingredients-empty")).await?;
        return Ok(());
    }

    // Quantity parsing extracts whatever literal is present; negative
    // amounts are rejected here instead
    if has_negative_quantity(input) {
        bot.send_message(msg.chat.id, t("ingredients-negative")).await?;
        return Ok(());
    }

    draft.ingredients = cleaned;
    bot.send_message(msg.chat.id, t("add-prep-time-prompt")).await?;
    dialogue
        .update(RecipeDialogueState::WaitingForPrepTime { draft })
        .await?;

    Ok(())
}

/// Handle the preparation time during the add-recipe dialogue
pub async fn handle_prep_time_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    input: &str,
    mut draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes >= 1 => {
            draft.prep_time_mins = minutes;
            bot.send_message(msg.chat.id, t("add-instructions-prompt")).await?;
            dialogue
                .update(RecipeDialogueState::WaitingForInstructions { draft })
                .await?;
        }
        _ => {
            bot.send_message(msg.chat.id, t("invalid-prep-time")).await?;
            // Keep dialogue active, user can try again
        }
    }

    Ok(())
}

/// Handle the cooking instructions during the add-recipe dialogue
pub async fn handle_instructions_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    input: &str,
    mut draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    let instructions = input.trim();
    if instructions.is_empty() {
        bot.send_message(msg.chat.id, t("instructions-empty")).await?;
        return Ok(());
    }

    draft.instructions = instructions.to_string();
    bot.send_message(msg.chat.id, t("add-difficulty-prompt"))
        .reply_markup(create_difficulty_keyboard())
        .await?;
    dialogue
        .update(RecipeDialogueState::WaitingForDifficulty { draft })
        .await?;

    Ok(())
}

/// Handle a typed difficulty during the add-recipe dialogue
pub async fn handle_difficulty_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    input: &str,
    mut draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    let difficulty = input.trim();
    if difficulty.is_empty() {
        bot.send_message(msg.chat.id, t("difficulty-invalid")).await?;
        return Ok(());
    }

    draft.difficulty = difficulty.to_string();
    advance_to_rating(bot, msg.chat.id, &dialogue, draft).await
}

/// Move the dialogue to the rating step; shared by the typed-difficulty and
/// keyboard-difficulty paths
pub async fn advance_to_rating(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &RecipeDialogue,
    draft: RecipeDraft,
) -> Result<()> {
    bot.send_message(chat_id, t("add-rating-prompt")).await?;
    dialogue
        .update(RecipeDialogueState::WaitingForRating { draft })
        .await?;
    Ok(())
}

/// Handle the rating and save the finished recipe
pub async fn handle_rating_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    conn: Arc<Mutex<Connection>>,
    input: &str,
    draft: RecipeDraft,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    let rating = match input.trim().parse::<f64>() {
        Ok(rating) if (0.0..=5.0).contains(&rating) => rating,
        _ => {
            bot.send_message(msg.chat.id, t("invalid-rating")).await?;
            // Keep dialogue active, user can try again
            return Ok(());
        }
    };

    let name = draft.name.clone();
    let saved = {
        let conn = conn.lock().await;
        save_recipe_draft(&conn, &draft, rating)
    };

    match saved {
        Ok(_) => {
            info!(name = %name, "Recipe saved from dialogue");
            bot.send_message(msg.chat.id, t_args("recipe-saved", &[("name", &name)]))
                .await?;
        }
        Err(e) => {
            error!(error = %e, "Failed to save recipe");
            bot.send_message(msg.chat.id, t("error-save-failed")).await?;
        }
    }

    // End the dialogue
    dialogue.exit().await?;

    Ok(())
}

/// Handle the desired serving count for `/scale`
pub async fn handle_scale_servings_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RecipeDialogue,
    conn: Arc<Mutex<Connection>>,
    input: &str,
    recipe_name: String,
) -> Result<()> {
    if is_cancellation(input) {
        return cancel_dialogue(bot, msg, &dialogue).await;
    }

    let desired = match input.trim().parse::<u32>() {
        Ok(desired) if desired >= 1 => desired,
        _ => {
            bot.send_message(msg.chat.id, t("invalid-servings")).await?;
            // Keep dialogue active, user can try again
            return Ok(());
        }
    };

    let recipe = {
        let conn = conn.lock().await;
        db::get_recipe_by_name(&conn, &recipe_name)?
    };

    match recipe {
        Some(recipe) => match scale_ingredients(&recipe.ingredients, recipe.servings, desired) {
            Ok(scaled) => {
                bot.send_message(
                    msg.chat.id,
                    format_scaled_ingredients(&recipe.name, desired, &scaled),
                )
                .await?;
            }
            Err(e) => {
                // Stored serving counts are validated >= 1, so this is a
                // data-corruption signal rather than user error
                error!(name = %recipe.name, error = %e, "Stored recipe has invalid servings");
                bot.send_message(msg.chat.id, t("error-scale-failed")).await?;
            }
        },
        None => {
            bot.send_message(
                msg.chat.id,
                t_args("recipe-not-found", &[("name", &recipe_name)]),
            )
            .await?;
        }
    }

    dialogue.exit().await?;

    Ok(())
}

/// Build a [`Recipe`] from a completed draft and store it
pub fn save_recipe_draft(conn: &Connection, draft: &RecipeDraft, rating: f64) -> Result<i64> {
    let recipe = Recipe::new(&draft.name)
        .with_category(&draft.category)
        .with_servings(draft.servings)
        .with_ingredients(&draft.ingredients)
        .with_prep_time(draft.prep_time_mins)
        .with_instructions(&draft.instructions)
        .with_difficulty(&draft.difficulty)
        .with_rating(rating);

    db::create_recipe(conn, &recipe)
}
