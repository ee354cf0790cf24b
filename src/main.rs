use anyhow::Result;
use recipebook::dialogue::{RecipeDialogue, RecipeDialogueState};
use recipebook::{bot, db, localization};
use rusqlite::Connection;
use std::env;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate environment variables at startup
fn validate_environment_variables() -> Result<()> {
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
        anyhow::anyhow!(
            "TELEGRAM_BOT_TOKEN environment variable is required but not set. Please set it to your Telegram bot token."
        )
    })?;

    if bot_token.trim().is_empty() {
        return Err(anyhow::anyhow!("TELEGRAM_BOT_TOKEN cannot be empty"));
    }

    // Telegram bot tokens have the form bot_id:secret
    if !bot_token.contains(':') {
        return Err(anyhow::anyhow!(
            "TELEGRAM_BOT_TOKEN format is invalid. Telegram bot tokens should contain a colon (:) character."
        ));
    }

    let database_path = env::var("DATABASE_PATH").map_err(|_| {
        anyhow::anyhow!(
            "DATABASE_PATH environment variable is required but not set. Please set it to the SQLite database file path."
        )
    })?;

    if database_path.trim().is_empty() {
        return Err(anyhow::anyhow!("DATABASE_PATH cannot be empty"));
    }

    info!("Environment variables validated successfully");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenv::dotenv().ok();

    // Initialize logging; the fmt subscriber also captures `log` records
    // emitted by the core modules
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Recipe Book Telegram Bot");

    validate_environment_variables()?;

    let bot_token = env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");
    let database_path = env::var("DATABASE_PATH").expect("DATABASE_PATH must be set");

    info!(database_path = %database_path, "Initializing database");

    // Create database connection
    let conn = Connection::open(&database_path)?;

    // Initialize database schema
    db::init_database_schema(&conn)?;

    // Wrap connection in Arc<Mutex> for sharing across async tasks
    let shared_conn = Arc::new(Mutex::new(conn));

    // Initialize localization manager
    localization::init_localization()?;

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    // Create shared dialogue storage
    let dialogue_storage = InMemStorage::<RecipeDialogueState>::new();

    // Set up the dispatcher with shared connection and dialogue support
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let conn = Arc::clone(&shared_conn);
            let storage = dialogue_storage.clone();
            move |bot: Bot, msg: Message| {
                let conn = Arc::clone(&conn);
                let storage = storage.clone();
                let dialogue = RecipeDialogue::new(storage, msg.chat.id);
                async move { bot::message_handler(bot, msg, conn, dialogue).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let conn = Arc::clone(&shared_conn);
            let storage = dialogue_storage.clone();
            move |bot: Bot, q: CallbackQuery| {
                let conn = Arc::clone(&conn);
                let storage = storage.clone();
                // Use the chat ID from the original message that contained the
                // inline keyboard
                let chat_id = match &q.message {
                    Some(msg) => match msg {
                        teloxide::types::MaybeInaccessibleMessage::Regular(msg) => msg.chat.id,
                        teloxide::types::MaybeInaccessibleMessage::Inaccessible(_) => {
                            ChatId::from(q.from.id)
                        }
                    },
                    None => ChatId::from(q.from.id),
                };
                let dialogue = RecipeDialogue::new(storage, chat_id);
                async move { bot::callback_handler(bot, q, conn, dialogue).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
