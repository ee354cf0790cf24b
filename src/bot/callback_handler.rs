//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use rusqlite::Connection;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::debug;

// Import dialogue types
use crate::dialogue::{RecipeDialogue, RecipeDialogueState};

// Import dialogue manager functions
use super::dialogue_manager::{advance_to_rating, advance_to_servings};

/// Handle callback queries from the category and difficulty keyboards
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    _conn: Arc<Mutex<Connection>>,
    dialogue: RecipeDialogue,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    // Check dialogue state
    let dialogue_state = dialogue.get().await?;

    match dialogue_state {
        Some(RecipeDialogueState::WaitingForCategory { mut draft }) => {
            if let Some(category) = q.data.as_deref().and_then(|d| d.strip_prefix("category:")) {
                if let Some(msg) = &q.message {
                    draft.category = category.to_string();
                    advance_to_servings(&bot, msg.chat().id, &dialogue, draft).await?;
                }
            }
        }
        Some(RecipeDialogueState::WaitingForDifficulty { mut draft }) => {
            if let Some(difficulty) = q.data.as_deref().and_then(|d| d.strip_prefix("difficulty:"))
            {
                if let Some(msg) = &q.message {
                    draft.difficulty = difficulty.to_string();
                    advance_to_rating(&bot, msg.chat().id, &dialogue, draft).await?;
                }
            }
        }
        _ => {
            // Ignore callbacks for other states
        }
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
