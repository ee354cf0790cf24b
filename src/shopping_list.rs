//! # Shopping List Aggregator
//!
//! Merges ingredient lists from multiple recipes into a single shopping list.
//! Two strategies exist because two call sites evolved separately: the summed
//! mode parses quantities and accumulates totals per normalized ingredient
//! name, while the legacy deduplicated mode only removes exact duplicates and
//! sorts.
//!
//! ## Usage
//!
//! ```rust
//! use recipebook::shopping_list::{build_shopping_list, MergeStrategy};
//!
//! let lists = ["2 cups sugar, 3 eggs", "1 cup Sugar"];
//! let merged = build_shopping_list(&lists, MergeStrategy::Summed);
//! assert_eq!(merged, vec!["3 sugars", "3 eggs"]);
//! ```

use log::debug;
use std::collections::{BTreeSet, HashMap};

use crate::quantity::{format_amount, parse_quantity_token, round_half_up_2};

/// Measurement words stripped from the front of a name when building the
/// merge key, so "2 cups sugar" and "1 cup Sugar" land in the same entry.
/// Deliberately naive: one leading word, no unit conversion.
const UNIT_WORDS: &[&str] = &[
    // Volume
    "cup", "cups", "teaspoon", "teaspoons", "tsp", "tablespoon", "tablespoons", "tbsp", "pint",
    "pints", "quart", "quarts", "gallon", "gallons", "ml", "milliliter", "milliliters",
    "millilitre", "millilitres", "l", "liter", "liters", "litre", "litres", "cl", "dl",
    // Weight
    "oz", "ounce", "ounces", "lb", "lbs", "pound", "pounds", "mg", "g", "gram", "grams", "kg",
    "kilogram", "kilograms",
    // Count and containers
    "slice", "slices", "can", "cans", "bottle", "bottles", "stick", "sticks", "packet", "packets",
    "pkg", "bag", "bags", "dash", "dashes", "pinch", "pinches", "drop", "drops", "cube", "cubes",
    "piece", "pieces", "handful", "handfuls", "bar", "bars", "sheet", "sheets", "clove", "cloves",
];

/// How ingredient lists are combined into a shopping list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Parse quantities and sum totals per normalized ingredient name
    Summed,
    /// Deduplicate exact ingredient text and sort; no quantity math (legacy)
    Deduplicated,
}

/// One merged row of a summed shopping list
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateEntry {
    /// Normalized merge key: lowercased, trimmed, leading unit word stripped
    pub name: String,
    /// Sum of all contributing amounts, rounded to two decimal places
    pub total: f64,
}

/// Build a shopping list from several recipes' ingredient lists.
///
/// Each element of `lists` is one recipe's comma-separated ingredient field.
/// Empty input produces an empty list. Output order is first-seen for
/// [`MergeStrategy::Summed`] and alphabetical for
/// [`MergeStrategy::Deduplicated`].
pub fn build_shopping_list<S: AsRef<str>>(lists: &[S], strategy: MergeStrategy) -> Vec<String> {
    match strategy {
        MergeStrategy::Summed => aggregate_summed(lists)
            .into_iter()
            .map(|entry| format_entry(&entry))
            .collect(),
        MergeStrategy::Deduplicated => combine_deduplicated(lists),
    }
}

/// Merge tokens across all lists, summing amounts per normalized name.
///
/// Tokens without a leading quantity contribute `1.0` so every item stays
/// countable. Entries keep first-seen order, which stands in for the mapping
/// iteration order the original behavior relied on.
pub fn aggregate_summed<S: AsRef<str>>(lists: &[S]) -> Vec<AggregateEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for list in lists {
        for token in tokens(list.as_ref()) {
            let parsed = parse_quantity_token(token);
            let key = normalize_name(&parsed.name);

            if !totals.contains_key(&key) {
                order.push(key.clone());
            }
            *totals.entry(key).or_insert(0.0) += parsed.amount;
        }
    }

    debug!("Aggregated {} distinct shopping list entries", order.len());

    order
        .into_iter()
        .map(|name| {
            let total = round_half_up_2(totals[&name]);
            AggregateEntry { name, total }
        })
        .collect()
}

/// Legacy combination mode: exact-text dedup after trimming, sorted, no sums.
fn combine_deduplicated<S: AsRef<str>>(lists: &[S]) -> Vec<String> {
    let mut unique: BTreeSet<String> = BTreeSet::new();

    for list in lists {
        for token in tokens(list.as_ref()) {
            unique.insert(token.to_string());
        }
    }

    unique.into_iter().collect()
}

fn tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Normalize an ingredient name into its merge key: lowercase, trim, and
/// strip one leading recognized unit word. A name that is nothing but a unit
/// word stays as-is so the entry still displays something.
fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    if let Some((first, rest)) = lowered.split_once(char::is_whitespace) {
        if UNIT_WORDS.contains(&first) {
            return rest.trim_start().to_string();
        }
    }

    lowered
}

/// Render one merged entry as a display line, applying the naive
/// pluralization rule: totals other than exactly 1 get a trailing "s" unless
/// the name already ends in one. Not grammatically correct for irregular
/// plurals; that is an accepted limitation.
fn format_entry(entry: &AggregateEntry) -> String {
    if entry.name.is_empty() {
        return format_amount(entry.total);
    }

    let name = if entry.total != 1.0 && !entry.name.ends_with('s') {
        format!("{}s", entry.name)
    } else {
        entry.name.clone()
    };

    format!("{} {}", format_amount(entry.total), name)
}
