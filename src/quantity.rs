//! # Quantity Parser
//!
//! This module extracts a leading numeric quantity from a free-form ingredient
//! token, returning the numeric amount and the remaining descriptive text.
//!
//! ## Features
//!
//! - Integer, decimal and simple-fraction literals ("3", "2.5", "1/2")
//! - Hyphen-attached quantities ("4-eggs" parses like "4 eggs")
//! - Silent fallback: tokens without a parseable quantity count as 1
//! - Shared rounding and display helpers for the scaler and aggregator
//!
//! ## Usage
//!
//! ```rust
//! use recipebook::quantity::parse_quantity_token;
//!
//! let parsed = parse_quantity_token("2 cups flour");
//! assert_eq!(parsed.amount, 2.0);
//! assert_eq!(parsed.name, "cups flour");
//! ```

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    /// Matches a leading numeric literal (optional sign, digits, optional
    /// fraction or decimal suffix) followed by whitespace and the rest of the
    /// token. The literal must end at whitespace or end-of-token, so inputs
    /// like "4/ cups" are not treated as quantities.
    static ref LEADING_QUANTITY: Regex =
        Regex::new(r"^(-?\d+(?:/\d+)?(?:\.\d+)?)(?:\s+(.*))?$")
            .expect("leading quantity pattern should be valid");

    /// Matches a numeric literal glued to the following word with a hyphen,
    /// e.g. "4-eggs".
    static ref HYPHENATED_QUANTITY: Regex =
        Regex::new(r"^(-?\d+(?:/\d+)?(?:\.\d+)?)-(.+)$")
            .expect("hyphenated quantity pattern should be valid");

    /// Finds every standalone numeric literal in an ingredient list, used to
    /// reject negative quantities at input-validation time.
    static ref NUMERIC_LITERAL: Regex =
        Regex::new(r"(?:^|[\s,])(-?\d*\.?\d+)")
            .expect("numeric literal pattern should be valid");
}

/// A parsed ingredient token: the numeric amount and the descriptive text
/// that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    /// The numeric amount; `1.0` when the token carried no parseable literal.
    pub amount: f64,
    /// The remaining descriptive text, trimmed. May be empty for a bare
    /// number token.
    pub name: String,
}

/// Rewrite a hyphen-attached leading quantity ("4-eggs") into the spaced form
/// ("4 eggs") so both shapes parse identically.
pub fn normalize_hyphenated_quantity(token: &str) -> Cow<'_, str> {
    HYPHENATED_QUANTITY.replace(token, "$1 $2")
}

/// Try to split a leading numeric literal off a token.
///
/// Returns `None` when the token carries no literal, or when the literal
/// fails numeric conversion (malformed fraction, zero denominator). Callers
/// that need the silent count-of-one fallback use [`parse_quantity_token`].
pub fn split_leading_quantity(token: &str) -> Option<ParsedQuantity> {
    let normalized = normalize_hyphenated_quantity(token);
    let captures = LEADING_QUANTITY.captures(normalized.as_ref())?;

    let literal = captures.get(1)?.as_str();
    let amount = match convert_literal(literal) {
        Some(amount) => amount,
        None => {
            trace!("Numeric conversion failed for literal '{}'", literal);
            return None;
        }
    };

    let name = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .unwrap_or("")
        .to_string();

    Some(ParsedQuantity { amount, name })
}

/// Parse an ingredient token into `(amount, name)`.
///
/// Tokens without a parseable leading literal fall back to amount `1.0` with
/// the whole trimmed token as the name. The fallback is silent: user-entered
/// ingredient text is free-form, and best-effort display beats a hard error.
pub fn parse_quantity_token(token: &str) -> ParsedQuantity {
    let trimmed = token.trim();

    match split_leading_quantity(trimmed) {
        Some(parsed) => parsed,
        None => {
            debug!("No leading quantity in '{}', counting as 1", trimmed);
            ParsedQuantity {
                amount: 1.0,
                name: trimmed.to_string(),
            }
        }
    }
}

/// Convert a matched literal to its numeric value.
///
/// Fractions become their decimal equivalent for uniform downstream math. A
/// zero denominator or a non-integer denominator is a failed conversion, not
/// a panic.
fn convert_literal(literal: &str) -> Option<f64> {
    if let Some((numerator, denominator)) = literal.split_once('/') {
        let numerator: f64 = numerator.parse().ok()?;
        let denominator: u32 = denominator.parse().ok()?;
        if denominator == 0 {
            return None;
        }
        Some(numerator / f64::from(denominator))
    } else {
        literal.parse().ok()
    }
}

/// Round to two decimal places, half away from zero.
///
/// Used by both the scaler and the aggregator so totals and scaled amounts
/// round the same way everywhere.
pub fn round_half_up_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format an amount for display: whole numbers render without a decimal
/// point ("3"), everything else as-is ("2.5", "0.33").
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

/// Check an ingredient list for negative numeric quantities.
///
/// Quantity parsing itself accepts whatever literal is present; rejecting
/// negative amounts is an input-validation concern handled before a recipe
/// is stored.
pub fn has_negative_quantity(ingredients: &str) -> bool {
    NUMERIC_LITERAL
        .captures_iter(ingredients)
        .any(|captures| {
            captures[1]
                .parse::<f64>()
                .map(|value| value < 0.0)
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_quantity() {
        let parsed = parse_quantity_token("3 eggs");
        assert_eq!(parsed.amount, 3.0);
        assert_eq!(parsed.name, "eggs");
    }

    #[test]
    fn test_parse_decimal_quantity() {
        let parsed = parse_quantity_token("2.5 cups milk");
        assert_eq!(parsed.amount, 2.5);
        assert_eq!(parsed.name, "cups milk");
    }

    #[test]
    fn test_parse_fraction_quantity() {
        let parsed = parse_quantity_token("1/2 cup flour");
        assert_eq!(parsed.amount, 0.5);
        assert_eq!(parsed.name, "cup flour");

        let parsed = parse_quantity_token("4/5 cup sugar");
        assert_eq!(parsed.amount, 0.8);
        assert_eq!(parsed.name, "cup sugar");
    }

    #[test]
    fn test_hyphenated_quantity_parses_like_spaced() {
        let hyphenated = parse_quantity_token("4-eggs");
        let spaced = parse_quantity_token("4 eggs");
        assert_eq!(hyphenated, spaced);
        assert_eq!(hyphenated.amount, 4.0);
        assert_eq!(hyphenated.name, "eggs");
    }

    #[test]
    fn test_no_quantity_counts_as_one() {
        let parsed = parse_quantity_token("salt");
        assert_eq!(parsed.amount, 1.0);
        assert_eq!(parsed.name, "salt");
    }

    #[test]
    fn test_bare_number_has_empty_name() {
        let parsed = parse_quantity_token("3");
        assert_eq!(parsed.amount, 3.0);
        assert_eq!(parsed.name, "");
    }

    #[test]
    fn test_malformed_fraction_falls_back_to_text() {
        let parsed = parse_quantity_token("4/ cups flour");
        assert_eq!(parsed.amount, 1.0);
        assert_eq!(parsed.name, "4/ cups flour");
    }

    #[test]
    fn test_double_dot_falls_back_to_text() {
        let parsed = parse_quantity_token("1..2 cups sugar");
        assert_eq!(parsed.amount, 1.0);
        assert_eq!(parsed.name, "1..2 cups sugar");
    }

    #[test]
    fn test_zero_denominator_falls_back_to_text() {
        let parsed = parse_quantity_token("1/0 cups oil");
        assert_eq!(parsed.amount, 1.0);
        assert_eq!(parsed.name, "1/0 cups oil");
    }

    #[test]
    fn test_negative_literal_is_extracted() {
        // The parser extracts whatever literal is present; rejection of
        // negative amounts happens at validation time.
        let parsed = parse_quantity_token("-2 eggs");
        assert_eq!(parsed.amount, -2.0);
        assert_eq!(parsed.name, "eggs");
    }

    #[test]
    fn test_split_returns_none_without_literal() {
        assert!(split_leading_quantity("olive oil").is_none());
        assert!(split_leading_quantity("4/ cups flour").is_none());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up_2(2.675000001), 2.68);
        assert_eq!(round_half_up_2(0.125), 0.13);
        assert_eq!(round_half_up_2(2.0), 2.0);
        assert_eq!(round_half_up_2(2.666666), 2.67);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(0.33), "0.33");
    }

    #[test]
    fn test_negative_quantity_scan() {
        assert!(has_negative_quantity("-2 eggs"));
        assert!(has_negative_quantity("2 cups flour, -1 cup sugar"));
        assert!(!has_negative_quantity("2 eggs, salt"));
        // A range-style token is not a negative quantity
        assert!(!has_negative_quantity("2-3 cups flour"));
        assert!(!has_negative_quantity(""));
    }
}
