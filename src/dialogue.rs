//! Recipe dialogue module for handling conversation state with users.
//!
//! The add-recipe flow walks through one field per message; the draft built
//! so far travels inside the dialogue state. A second, single-step state
//! collects the desired serving count for `/scale`.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// A recipe under construction during the add-recipe dialogue
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub category: String,
    pub servings: u32,
    pub ingredients: String,
    pub prep_time_mins: u32,
    pub instructions: String,
    pub difficulty: String,
}

/// Represents the conversation state
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum RecipeDialogueState {
    #[default]
    Start,
    WaitingForRecipeName,
    WaitingForCategory {
        draft: RecipeDraft,
    },
    WaitingForServings {
        draft: RecipeDraft,
    },
    WaitingForIngredients {
        draft: RecipeDraft,
    },
    WaitingForPrepTime {
        draft: RecipeDraft,
    },
    WaitingForInstructions {
        draft: RecipeDraft,
    },
    WaitingForDifficulty {
        draft: RecipeDraft,
    },
    WaitingForRating {
        draft: RecipeDraft,
    },
    WaitingForScaleServings {
        recipe_name: String,
    },
}

/// Type alias for our recipe dialogue
pub type RecipeDialogue = Dialogue<RecipeDialogueState, InMemStorage<RecipeDialogueState>>;

/// Validates a recipe name input
pub fn validate_recipe_name(name: &str) -> Result<String, &'static str> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    if trimmed.len() > 255 {
        return Err("too_long");
    }

    // A recipe called "42" would collide with serving-count prompts
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err("numeric");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_name_validation() {
        // Valid names
        assert!(validate_recipe_name("Chocolate Chip Cookies").is_ok());
        assert!(validate_recipe_name("  Mom's Lasagna  ").is_ok());

        // Invalid names
        assert_eq!(validate_recipe_name(""), Err("empty"));
        assert_eq!(validate_recipe_name("   "), Err("empty"));
        assert_eq!(validate_recipe_name(&"a".repeat(256)), Err("too_long"));
        assert_eq!(validate_recipe_name("12345"), Err("numeric"));
    }

    #[test]
    fn test_recipe_name_trimming() {
        let result = validate_recipe_name("  Test Recipe  ");
        assert_eq!(result.unwrap(), "Test Recipe");
    }

    #[test]
    fn test_name_with_digits_and_letters_is_valid() {
        assert!(validate_recipe_name("5-Minute Oats").is_ok());
    }
}
