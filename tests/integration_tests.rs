//! # Integration Tests
//!
//! End-to-end tests across storage and the core engine: store recipes, scale
//! one to a new serving count, build combined shopping lists, and pick a
//! suggestion honoring the cooked-recently cooldown.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::NamedTempFile;

use recipebook::db;
use recipebook::recipe::{clean_ingredient_list, Recipe};
use recipebook::scaling::scale_ingredients;
use recipebook::shopping_list::{build_shopping_list, MergeStrategy};
use recipebook::suggestion::{suggest, DEFAULT_RECENT_CUTOFF_DAYS};

fn setup_catalog() -> Result<(Connection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let conn = Connection::open(temp_file.path())?;
    db::init_database_schema(&conn)?;

    db::create_recipe(
        &conn,
        &Recipe::new("Pancakes")
            .with_category("Breakfast")
            .with_servings(4)
            .with_ingredients("2 cups flour, 3 eggs, 1.5 cups milk, 1 pinch salt")
            .with_prep_time(20)
            .with_instructions("Mix everything, fry in batches.")
            .with_difficulty("Easy"),
    )?;

    db::create_recipe(
        &conn,
        &Recipe::new("French Toast")
            .with_category("Breakfast")
            .with_servings(2)
            .with_ingredients("4 eggs, 1 cup milk, 8 slices bread")
            .with_prep_time(15)
            .with_instructions("Soak the bread, fry until golden.")
            .with_difficulty("Easy"),
    )?;

    Ok((conn, temp_file))
}

#[test]
fn test_stored_recipe_scales_to_new_servings() -> Result<()> {
    let (conn, _temp_file) = setup_catalog()?;

    let recipe = db::get_recipe_by_name(&conn, "Pancakes")?.unwrap();
    let scaled = scale_ingredients(&recipe.ingredients, recipe.servings, 6)?;

    assert_eq!(
        scaled,
        "3 cups flour, 4.5 eggs, 2.25 cups milk, 1.5 pinch salt"
    );

    Ok(())
}

#[test]
fn test_shopping_list_from_stored_recipes() -> Result<()> {
    let (conn, _temp_file) = setup_catalog()?;

    let pancakes = db::get_recipe_by_name(&conn, "Pancakes")?.unwrap();
    let toast = db::get_recipe_by_name(&conn, "French Toast")?.unwrap();
    let lists = [pancakes.ingredients, toast.ingredients];

    let summed = build_shopping_list(&lists, MergeStrategy::Summed);
    assert_eq!(
        summed,
        vec!["2 flours", "7 eggs", "2.5 milks", "1 salt", "8 breads"]
    );

    let deduplicated = build_shopping_list(&lists, MergeStrategy::Deduplicated);
    assert_eq!(
        deduplicated,
        vec![
            "1 cup milk",
            "1 pinch salt",
            "1.5 cups milk",
            "2 cups flour",
            "3 eggs",
            "4 eggs",
            "8 slices bread",
        ]
    );

    Ok(())
}

#[test]
fn test_suggestion_skips_recently_cooked_recipe() -> Result<()> {
    let (conn, _temp_file) = setup_catalog()?;

    let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let two_days_ago = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();

    db::append_cooking_date(&conn, "Pancakes", two_days_ago)?;

    let recipes = db::list_recipes(&conn)?;
    for _ in 0..20 {
        let suggested = suggest(&recipes, today, DEFAULT_RECENT_CUTOFF_DAYS).unwrap();
        assert_eq!(suggested.name, "French Toast");
    }

    Ok(())
}

#[test]
fn test_suggestion_falls_back_when_everything_is_recent() -> Result<()> {
    let (conn, _temp_file) = setup_catalog()?;

    let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let yesterday = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();

    db::append_cooking_date(&conn, "Pancakes", yesterday)?;
    db::append_cooking_date(&conn, "French Toast", yesterday)?;

    let recipes = db::list_recipes(&conn)?;
    assert!(suggest(&recipes, today, DEFAULT_RECENT_CUTOFF_DAYS).is_some());

    Ok(())
}

#[test]
fn test_cleaned_ingredients_still_parse_and_scale() -> Result<()> {
    // The add-recipe flow cleans the raw input before storing; the scaler
    // must behave the same on the cleaned form
    let cleaned = clean_ingredient_list("  2 cups flour ,3 EGGS,, salt ");
    assert_eq!(cleaned, "2 cups flour, 3 eggs, Salt");

    let scaled = scale_ingredients(&cleaned, 2, 4)?;
    assert_eq!(scaled, "4 cups flour, 6 eggs, Salt");

    Ok(())
}
