use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tracing::{debug, info, warn};

use crate::recipe::Recipe;

/// Initialize the database schema
pub fn init_database_schema(conn: &Connection) -> Result<()> {
    info!("Initializing database schema");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL DEFAULT '',
            servings INTEGER NOT NULL DEFAULT 1,
            ingredients TEXT NOT NULL,
            prep_time_mins INTEGER NOT NULL DEFAULT 1,
            instructions TEXT NOT NULL DEFAULT '',
            difficulty TEXT NOT NULL DEFAULT '',
            rating REAL NOT NULL DEFAULT 0,
            cooking_history TEXT NOT NULL DEFAULT '[]',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create recipes table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Store a new recipe and return its row id.
///
/// Name uniqueness is enforced by the schema; callers check
/// [`recipe_name_exists`] first to give the user a friendly message instead
/// of a constraint error.
pub fn create_recipe(conn: &Connection, recipe: &Recipe) -> Result<i64> {
    info!(name = %recipe.name, "Creating new recipe");

    let history = serde_json::to_string(&recipe.cooking_history)
        .context("Failed to serialize cooking history")?;

    conn.execute(
        "INSERT INTO recipes (name, category, servings, ingredients, prep_time_mins,
                              instructions, difficulty, rating, cooking_history)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            recipe.name,
            recipe.category,
            recipe.servings,
            recipe.ingredients,
            recipe.prep_time_mins,
            recipe.instructions,
            recipe.difficulty,
            recipe.rating,
            history,
        ],
    )
    .context("Failed to insert recipe")?;

    let recipe_id = conn.last_insert_rowid();
    info!(name = %recipe.name, recipe_id, "Recipe created");

    Ok(recipe_id)
}

/// Check whether a recipe name is already taken (case-insensitive)
pub fn recipe_name_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM recipes WHERE name = ?1 COLLATE NOCASE",
            params![name.trim()],
            |row| row.get(0),
        )
        .context("Failed to check recipe name")?;

    Ok(count > 0)
}

/// Fetch a recipe by name (case-insensitive)
pub fn get_recipe_by_name(conn: &Connection, name: &str) -> Result<Option<Recipe>> {
    debug!(name = %name, "Reading recipe by name");

    let mut stmt = conn
        .prepare(
            "SELECT id, name, category, servings, ingredients, prep_time_mins,
                    instructions, difficulty, rating, cooking_history
             FROM recipes WHERE name = ?1 COLLATE NOCASE",
        )
        .context("Failed to prepare recipe lookup")?;

    let recipe = stmt.query_row(params![name.trim()], row_to_recipe);

    match recipe {
        Ok(recipe) => Ok(Some(recipe)),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            debug!(name = %name, "No recipe found");
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to read recipe"),
    }
}

/// List all recipes in insertion order
pub fn list_recipes(conn: &Connection) -> Result<Vec<Recipe>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, category, servings, ingredients, prep_time_mins,
                    instructions, difficulty, rating, cooking_history
             FROM recipes ORDER BY id",
        )
        .context("Failed to prepare recipe listing")?;

    let recipes = stmt
        .query_map([], row_to_recipe)
        .context("Failed to list recipes")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to read recipe rows")?;

    debug!(count = recipes.len(), "Listed recipes");
    Ok(recipes)
}

/// Append a cooking date to a recipe's history.
///
/// Loads the stored history, appends, and rewrites the column. Returns
/// `false` when no recipe with that name exists.
pub fn append_cooking_date(conn: &Connection, name: &str, date: NaiveDate) -> Result<bool> {
    info!(name = %name, date = %date, "Appending cooking date");

    let recipe = match get_recipe_by_name(conn, name)? {
        Some(recipe) => recipe,
        None => return Ok(false),
    };

    let mut history = recipe.cooking_history;
    history.push(date);
    let serialized =
        serde_json::to_string(&history).context("Failed to serialize cooking history")?;

    let rows_affected = conn
        .execute(
            "UPDATE recipes SET cooking_history = ?1 WHERE id = ?2",
            params![serialized, recipe.id],
        )
        .context("Failed to update cooking history")?;

    Ok(rows_affected > 0)
}

/// Delete a recipe by name. Returns `false` when no such recipe exists.
pub fn delete_recipe(conn: &Connection, name: &str) -> Result<bool> {
    info!(name = %name, "Deleting recipe");

    let rows_affected = conn
        .execute(
            "DELETE FROM recipes WHERE name = ?1 COLLATE NOCASE",
            params![name.trim()],
        )
        .context("Failed to delete recipe")?;

    Ok(rows_affected > 0)
}

fn row_to_recipe(row: &Row) -> rusqlite::Result<Recipe> {
    let history_raw: String = row.get(9)?;
    // Damaged history JSON degrades to an empty history rather than failing
    // the whole row
    let cooking_history: Vec<NaiveDate> = match serde_json::from_str(&history_raw) {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "Unreadable cooking history, treating as empty");
            Vec::new()
        }
    };

    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        servings: row.get(3)?,
        ingredients: row.get(4)?,
        prep_time_mins: row.get(5)?,
        instructions: row.get(6)?,
        difficulty: row.get(7)?,
        rating: row.get(8)?,
        cooking_history,
    })
}
