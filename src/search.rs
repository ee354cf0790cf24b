//! # Ingredient Search
//!
//! Case-insensitive substring search over recipe ingredient fields. Plain
//! string containment, nothing cleverer: "milk" finds both "2% milk" and
//! "whole milk".

use log::debug;

use crate::recipe::Recipe;

/// Return every recipe whose ingredient list contains `ingredient` as a
/// case-insensitive substring. An empty or whitespace-only query matches
/// nothing.
pub fn search_by_ingredient<'a>(recipes: &'a [Recipe], ingredient: &str) -> Vec<&'a Recipe> {
    let needle = ingredient.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let found: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| recipe.ingredients.to_lowercase().contains(&needle))
        .collect();

    debug!(
        "Ingredient search for '{}' matched {} of {} recipes",
        needle,
        found.len(),
        recipes.len()
    );

    found
}
