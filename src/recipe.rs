//! # Recipe Data Model
//!
//! Defines the recipe record exchanged between the storage layer, the core
//! engine and the bot surface, plus the input-cleanup helpers applied when a
//! recipe is added.
//!
//! ## Usage
//!
//! ```rust
//! use recipebook::recipe::Recipe;
//!
//! let pancakes = Recipe::new("Pancakes")
//!     .with_category("Breakfast")
//!     .with_servings(4)
//!     .with_ingredients("2 cups flour, 3 eggs, 1.5 cups milk")
//!     .with_prep_time(20)
//!     .with_difficulty("Easy");
//!
//! assert_eq!(pancakes.servings, 4);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe record.
///
/// The core engine only reads `ingredients` (comma-separated tokens) and
/// `servings`; the remaining fields belong to the catalog surface. Category
/// and difficulty stay free-form strings, matching the stored records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Database identifier; `0` until the recipe is stored
    pub id: i64,

    /// Unique recipe name
    pub name: String,

    /// Meal category (e.g. "Breakfast", "Dinner")
    pub category: String,

    /// Number of servings the ingredient list is written for; always >= 1
    pub servings: u32,

    /// Comma-separated ingredient tokens
    pub ingredients: String,

    /// Preparation time in minutes
    pub prep_time_mins: u32,

    /// Step-by-step cooking instructions
    pub instructions: String,

    /// Difficulty level (e.g. "Easy", "Medium", "Hard")
    pub difficulty: String,

    /// Rating on a 0-5 scale
    pub rating: f64,

    /// Dates the recipe was cooked, in insertion order
    pub cooking_history: Vec<NaiveDate>,
}

impl Recipe {
    /// Create a new recipe with just a name
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            category: String::new(),
            servings: 1,
            ingredients: String::new(),
            prep_time_mins: 1,
            instructions: String::new(),
            difficulty: String::new(),
            rating: 0.0,
            cooking_history: Vec::new(),
        }
    }

    /// Set the meal category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the serving count
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Set the comma-separated ingredient list
    pub fn with_ingredients(mut self, ingredients: &str) -> Self {
        self.ingredients = ingredients.to_string();
        self
    }

    /// Set the preparation time in minutes
    pub fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time_mins = minutes;
        self
    }

    /// Set the cooking instructions
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Set the difficulty level
    pub fn with_difficulty(mut self, difficulty: &str) -> Self {
        self.difficulty = difficulty.to_string();
        self
    }

    /// Set the rating, clamped to the 0-5 scale
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    /// Replace the cooking history
    pub fn with_cooking_history(mut self, history: Vec<NaiveDate>) -> Self {
        self.cooking_history = history;
        self
    }

    /// The most recent cooking date, if any.
    ///
    /// History is kept in insertion order; the last entry is the most recent
    /// one recorded.
    pub fn last_cooked(&self) -> Option<NaiveDate> {
        self.cooking_history.last().copied()
    }

    /// Cooking history sorted ascending for display
    pub fn sorted_history(&self) -> Vec<NaiveDate> {
        let mut history = self.cooking_history.clone();
        history.sort();
        history
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} servings, {} mins, {})",
            self.name, self.category, self.servings, self.prep_time_mins, self.difficulty
        )
    }
}

/// Clean a raw ingredient list for storage: split on commas, trim, drop
/// empty tokens, capitalize each token, and re-join with `", "`.
pub fn clean_ingredient_list(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Capitalize a token: first character uppercased, the rest lowercased.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
