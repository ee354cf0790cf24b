//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// Import localization
use crate::localization::{t, t_args};

use crate::recipe::Recipe;

/// Meal categories offered during the add-recipe dialogue
pub const CATEGORIES: &[&str] = &["Breakfast", "Lunch", "Dinner", "Dessert"];

/// Difficulty levels offered during the add-recipe dialogue
pub const DIFFICULTIES: &[&str] = &["Easy", "Medium", "Hard"];

/// Create the inline keyboard for picking a meal category
pub fn create_category_keyboard() -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = CATEGORIES
        .iter()
        .map(|category| {
            vec![InlineKeyboardButton::callback(
                category.to_string(),
                format!("category:{}", category),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Create the inline keyboard for picking a difficulty level
pub fn create_difficulty_keyboard() -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = DIFFICULTIES
        .iter()
        .map(|difficulty| {
            vec![InlineKeyboardButton::callback(
                difficulty.to_string(),
                format!("difficulty:{}", difficulty),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Format the catalog as a numbered list
pub fn format_recipe_list(recipes: &[Recipe]) -> String {
    let mut result = String::new();

    for (i, recipe) in recipes.iter().enumerate() {
        result.push_str(&format!(
            "{}. *{}* — {}, {} {}, {}\n",
            i + 1,
            recipe.name,
            recipe.category,
            recipe.prep_time_mins,
            t("minutes-short"),
            recipe.difficulty
        ));
    }

    result
}

/// Format one recipe's full details for display
pub fn format_recipe_details(recipe: &Recipe) -> String {
    format!(
        "*{}*\n\n{}: {}\n{}: {}\n{}: {} {}\n{}: {}\n{}: {}/5\n\n{}:\n{}\n\n{}:\n{}",
        recipe.name,
        t("label-category"),
        recipe.category,
        t("label-difficulty"),
        recipe.difficulty,
        t("label-prep-time"),
        recipe.prep_time_mins,
        t("minutes-short"),
        t("label-servings"),
        recipe.servings,
        t("label-rating"),
        recipe.rating,
        t("label-ingredients"),
        bulleted(recipe.ingredients.split(',').map(str::trim)),
        t("label-instructions"),
        recipe.instructions
    )
}

/// Format a scaled ingredient list as a checklist
pub fn format_scaled_ingredients(recipe_name: &str, servings: u32, scaled: &str) -> String {
    format!(
        "{}\n\n{}",
        t_args(
            "scale-result-title",
            &[("name", recipe_name), ("servings", &servings.to_string())],
        ),
        bulleted(scaled.split(',').map(str::trim))
    )
}

/// Format shopping list lines for display
pub fn format_shopping_list(lines: &[String]) -> String {
    format!(
        "{}\n\n{}",
        t("shopping-list-title"),
        bulleted(lines.iter().map(String::as_str))
    )
}

/// Format a recipe's cooking history, sorted ascending
pub fn format_cooking_history(recipe: &Recipe) -> String {
    let history = recipe.sorted_history();
    if history.is_empty() {
        return t("history-empty");
    }

    let lines: Vec<String> = history.iter().map(|date| date.to_string()).collect();
    format!(
        "{}\n{}",
        t("history-title"),
        bulleted(lines.iter().map(String::as_str))
    )
}

fn bulleted<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .filter(|item| !item.is_empty())
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
