//! # Ingredient Scaler
//!
//! Scales every quantified ingredient in a comma-separated list by the ratio
//! of desired to original servings, reassembling a display string. Tokens
//! without a leading quantity pass through unchanged.
//!
//! ## Usage
//!
//! ```rust
//! use recipebook::scaling::scale_ingredients;
//!
//! let scaled = scale_ingredients("2 cups flour, 1 egg, salt", 2, 4).unwrap();
//! assert_eq!(scaled, "4 cups flour, 2 egg, salt");
//! ```

use log::debug;

use crate::quantity::{format_amount, round_half_up_2, split_leading_quantity};

/// Errors that can occur while scaling an ingredient list
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// The original serving count was zero, so no ratio exists
    DivisionUndefined,
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::DivisionUndefined => {
                write!(f, "Original servings must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ScaleError {}

/// Scale ingredient quantities to a desired serving count.
///
/// Splits `ingredients` on commas, multiplies every parsed leading quantity
/// by `desired_servings / original_servings` and rounds to two decimal
/// places. Tokens without a parseable quantity are kept verbatim. The result
/// joins the tokens back with `", "`.
///
/// Serving counts are validated upstream, but a zero `original_servings`
/// still returns [`ScaleError::DivisionUndefined`] rather than dividing.
/// An empty ingredient list yields an empty string.
pub fn scale_ingredients(
    ingredients: &str,
    original_servings: u32,
    desired_servings: u32,
) -> Result<String, ScaleError> {
    if original_servings == 0 {
        return Err(ScaleError::DivisionUndefined);
    }

    let ratio = f64::from(desired_servings) / f64::from(original_servings);
    debug!(
        "Scaling ingredient list by ratio {} ({} -> {} servings)",
        ratio, original_servings, desired_servings
    );

    let scaled: Vec<String> = ingredients
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match split_leading_quantity(token) {
            Some(parsed) => {
                let amount = round_half_up_2(parsed.amount * ratio);
                format!("{} {}", format_amount(amount), parsed.name)
                    .trim()
                    .to_string()
            }
            None => token.to_string(),
        })
        .collect();

    Ok(scaled.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_doubles_quantities() {
        let scaled = scale_ingredients("2 cups flour, 3 eggs", 2, 4).unwrap();
        assert_eq!(scaled, "4 cups flour, 6 eggs");
    }

    #[test]
    fn test_scale_down_produces_decimals() {
        let scaled = scale_ingredients("3 cups milk", 4, 2).unwrap();
        assert_eq!(scaled, "1.5 cups milk");
    }

    #[test]
    fn test_scale_fraction_quantity() {
        let scaled = scale_ingredients("1/2 cup flour", 2, 1).unwrap();
        assert_eq!(scaled, "0.25 cup flour");
    }

    #[test]
    fn test_unquantified_token_passes_through() {
        let scaled = scale_ingredients("salt, 2 eggs", 1, 3).unwrap();
        assert_eq!(scaled, "salt, 6 eggs");
    }

    #[test]
    fn test_hyphenated_quantity_is_scaled() {
        let scaled = scale_ingredients("4-eggs", 2, 1).unwrap();
        assert_eq!(scaled, "2 eggs");
    }

    #[test]
    fn test_malformed_quantity_is_kept_verbatim() {
        let scaled = scale_ingredients("4/ cups flour", 1, 2).unwrap();
        assert_eq!(scaled, "4/ cups flour");
    }

    #[test]
    fn test_identity_ratio_normalizes_whitespace_only() {
        let scaled = scale_ingredients(" 2 cups flour ,  1 egg ", 3, 3).unwrap();
        assert_eq!(scaled, "2 cups flour, 1 egg");
    }

    #[test]
    fn test_zero_original_servings_is_an_error() {
        assert_eq!(
            scale_ingredients("1 egg", 0, 4),
            Err(ScaleError::DivisionUndefined)
        );
    }

    #[test]
    fn test_empty_list_yields_empty_string() {
        assert_eq!(scale_ingredients("", 2, 4).unwrap(), "");
    }

    #[test]
    fn test_bare_number_token_keeps_amount_only() {
        let scaled = scale_ingredients("3", 1, 2).unwrap();
        assert_eq!(scaled, "6");
    }
}
