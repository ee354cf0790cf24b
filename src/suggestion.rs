//! # Random Recipe Suggestion
//!
//! Picks a random recipe that has not been cooked recently. Recipes never
//! cooked, or last cooked more than the cutoff number of days ago, are
//! eligible; if nothing qualifies the whole catalog is used so a suggestion
//! is always made when any recipe exists.

use chrono::NaiveDate;
use log::debug;
use rand::seq::SliceRandom;

use crate::recipe::Recipe;

/// Days a recipe stays excluded from suggestions after being cooked
pub const DEFAULT_RECENT_CUTOFF_DAYS: i64 = 7;

/// Suggest a random recipe not cooked within `cutoff_days` before `today`.
///
/// The date is injected by the caller (the bot passes the current local
/// date) so suggestion logic stays deterministic under test. Returns `None`
/// only for an empty catalog.
pub fn suggest<'a>(
    recipes: &'a [Recipe],
    today: NaiveDate,
    cutoff_days: i64,
) -> Option<&'a Recipe> {
    let candidates: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| is_eligible(recipe, today, cutoff_days))
        .collect();

    debug!(
        "{} of {} recipes eligible for suggestion",
        candidates.len(),
        recipes.len()
    );

    let mut rng = rand::thread_rng();
    if candidates.is_empty() {
        // Everything was cooked recently: fall back to the whole catalog
        recipes.choose(&mut rng)
    } else {
        candidates.choose(&mut rng).copied()
    }
}

fn is_eligible(recipe: &Recipe, today: NaiveDate, cutoff_days: i64) -> bool {
    match recipe.last_cooked() {
        None => true,
        Some(last) => (today - last).num_days() > cutoff_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_never_cooked_is_eligible() {
        let recipes = vec![Recipe::new("Pancakes")];
        let suggested = suggest(&recipes, date(2026, 8, 6), DEFAULT_RECENT_CUTOFF_DAYS);
        assert_eq!(suggested.unwrap().name, "Pancakes");
    }

    #[test]
    fn test_recently_cooked_is_skipped() {
        let recipes = vec![
            Recipe::new("Pancakes").with_cooking_history(vec![date(2026, 8, 4)]),
            Recipe::new("Soup").with_cooking_history(vec![date(2026, 7, 1)]),
        ];

        for _ in 0..20 {
            let suggested = suggest(&recipes, date(2026, 8, 6), DEFAULT_RECENT_CUTOFF_DAYS);
            assert_eq!(suggested.unwrap().name, "Soup");
        }
    }

    #[test]
    fn test_cutoff_boundary_is_exclusive() {
        // Exactly cutoff days ago still counts as recent
        let recipes = vec![
            Recipe::new("Pancakes").with_cooking_history(vec![date(2026, 7, 30)]),
            Recipe::new("Soup"),
        ];

        for _ in 0..20 {
            let suggested = suggest(&recipes, date(2026, 8, 6), 7);
            assert_eq!(suggested.unwrap().name, "Soup");
        }
    }

    #[test]
    fn test_falls_back_to_whole_catalog() {
        let recipes =
            vec![Recipe::new("Pancakes").with_cooking_history(vec![date(2026, 8, 5)])];
        let suggested = suggest(&recipes, date(2026, 8, 6), DEFAULT_RECENT_CUTOFF_DAYS);
        assert_eq!(suggested.unwrap().name, "Pancakes");
    }

    #[test]
    fn test_empty_catalog_yields_none() {
        let recipes: Vec<Recipe> = Vec::new();
        assert!(suggest(&recipes, date(2026, 8, 6), DEFAULT_RECENT_CUTOFF_DAYS).is_none());
    }
}
