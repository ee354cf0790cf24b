//! # Dialogue Tests
//!
//! Tests for recipe name validation and dialogue state payloads.

use anyhow::Result;

use recipebook::dialogue::{validate_recipe_name, RecipeDialogueState, RecipeDraft};

#[test]
fn test_recipe_name_validation() {
    // Valid names
    assert!(validate_recipe_name("Chocolate Chip Cookies").is_ok());
    assert!(validate_recipe_name("  Mom's Lasagna  ").is_ok());
    assert!(validate_recipe_name("5-Minute Oats").is_ok());

    // Invalid names
    assert_eq!(validate_recipe_name(""), Err("empty"));
    assert_eq!(validate_recipe_name("   "), Err("empty"));
    assert_eq!(validate_recipe_name(&"a".repeat(256)), Err("too_long"));
    assert_eq!(validate_recipe_name("42"), Err("numeric"));
}

#[test]
fn test_recipe_name_is_trimmed() {
    assert_eq!(validate_recipe_name("  Test Recipe  ").unwrap(), "Test Recipe");
}

#[tokio::test]
async fn test_dialogue_state_serialization() -> Result<()> {
    // Dialogue states carry the draft between steps and must survive a
    // serde round-trip for the dialogue storage
    let draft = RecipeDraft {
        name: "Pancakes".to_string(),
        category: "Breakfast".to_string(),
        servings: 4,
        ingredients: "2 cups flour, 3 eggs".to_string(),
        prep_time_mins: 20,
        instructions: "Mix and fry.".to_string(),
        difficulty: "Easy".to_string(),
    };

    let state = RecipeDialogueState::WaitingForRating { draft: draft.clone() };

    let serialized = serde_json::to_string(&state)?;
    let restored: RecipeDialogueState = serde_json::from_str(&serialized)?;

    match restored {
        RecipeDialogueState::WaitingForRating { draft: restored_draft } => {
            assert_eq!(restored_draft, draft);
        }
        _ => panic!("Unexpected dialogue state after round-trip"),
    }

    Ok(())
}

#[tokio::test]
async fn test_scale_state_serialization() -> Result<()> {
    let state = RecipeDialogueState::WaitingForScaleServings {
        recipe_name: "Pancakes".to_string(),
    };

    let serialized = serde_json::to_string(&state)?;
    let restored: RecipeDialogueState = serde_json::from_str(&serialized)?;

    match restored {
        RecipeDialogueState::WaitingForScaleServings { recipe_name } => {
            assert_eq!(recipe_name, "Pancakes");
        }
        _ => panic!("Unexpected dialogue state after round-trip"),
    }

    Ok(())
}

#[test]
fn test_default_state_is_start() {
    assert!(matches!(
        RecipeDialogueState::default(),
        RecipeDialogueState::Start
    ));
}
