use samwich_protocol::Macros;
use tracing::{debug, warn};

use crate::model::IngredientSnapshot;
use crate::model::quantity::parse_quantity;

use super::table::NutritionLookup;

/// Recompute a recipe's macro totals after its ingredient quantities were
/// edited.
///
/// Only rows whose quantity text changed are looked up; for those the
/// per-unit facts times the quantity delta is added to `original`. Rows the
/// lookup cannot resolve contribute nothing. Each total is rounded to the
/// nearest integer on its own.
///
/// The two ingredient lists are aligned by index; if their lengths differ
/// only the common prefix is considered.
pub fn recalculate(
    original: &Macros,
    original_ingredients: &[IngredientSnapshot],
    edited_ingredients: &[IngredientSnapshot],
    lookup: &impl NutritionLookup,
) -> Macros {
    if original_ingredients.len() != edited_ingredients.len() {
        warn!(
            original = original_ingredients.len(),
            edited = edited_ingredients.len(),
            "ingredient lists differ in length"
        );
    }

    let mut totals = *original;
    for (before, after) in original_ingredients.iter().zip(edited_ingredients) {
        if after.quantity == before.quantity {
            continue;
        }
        let Some(facts) = lookup.facts_of(&after.name) else {
            debug!(ingredient = %after.name, "no nutrition facts, skipping");
            continue;
        };
        let delta = parse_quantity(&after.quantity) - parse_quantity(&before.quantity);
        totals += facts.scaled(delta);
    }
    totals.rounded()
}

#[cfg(test)]
mod tests {
    use samwich_protocol::NutritionFacts;

    use super::*;
    use crate::nutrition::NutritionTable;

    fn eggs_table() -> NutritionTable {
        NutritionTable::from_entries([(
            "Eggs",
            NutritionFacts {
                calories: 70.0,
                carbohydrates: 1.0,
                protein: 6.0,
                fiber: 0.0,
                fat: 5.0,
            },
        )])
    }

    fn base() -> Macros {
        Macros::new(100.0, 20.0, 5.0, 2.0, 1.0)
    }

    #[test]
    fn doubling_eggs() {
        let before = vec![IngredientSnapshot::new("Eggs", "2")];
        let after = vec![IngredientSnapshot::new("Eggs", "4")];
        let totals = recalculate(&base(), &before, &after, &eggs_table());
        assert_eq!(totals, Macros::new(240.0, 22.0, 17.0, 2.0, 11.0));
    }

    #[test]
    fn unchanged_rows_return_rounded_original() {
        let original = Macros::new(100.4, 20.6, 5.5, 2.2, 0.9);
        let rows = vec![
            IngredientSnapshot::new("Eggs", "2"),
            IngredientSnapshot::new("Mystery", "3"),
        ];
        let totals = recalculate(&original, &rows, &rows.clone(), &eggs_table());
        assert_eq!(totals, original.rounded());
    }

    #[test]
    fn unmatched_ingredients_are_skipped() {
        let before = vec![
            IngredientSnapshot::new("Tofu", "1"),
            IngredientSnapshot::new("Eggs", "2"),
        ];
        let after = vec![
            IngredientSnapshot::new("Tofu", "5"),
            IngredientSnapshot::new("Eggs", "1"),
        ];
        let totals = recalculate(&base(), &before, &after, &eggs_table());
        assert_eq!(totals, Macros::new(30.0, 19.0, -1.0, 2.0, -4.0));
    }

    #[test]
    fn fuzzy_names_resolve() {
        let before = vec![IngredientSnapshot::new("Free-range eggs", "1")];
        let after = vec![IngredientSnapshot::new("Free-range eggs", "2")];
        let totals = recalculate(&Macros::ZERO, &before, &after, &eggs_table());
        assert_eq!(totals.calories, 70.0);
    }

    #[test]
    fn text_change_with_same_value_contributes_nothing() {
        let before = vec![IngredientSnapshot::new("Eggs", "2")];
        let after = vec![IngredientSnapshot::new("Eggs", "2.0")];
        let totals = recalculate(&base(), &before, &after, &eggs_table());
        assert_eq!(totals, base());
    }

    #[test]
    fn length_mismatch_uses_common_prefix() {
        let before = vec![IngredientSnapshot::new("Eggs", "1")];
        let after = vec![
            IngredientSnapshot::new("Eggs", "2"),
            IngredientSnapshot::new("Eggs", "9"),
        ];
        let totals = recalculate(&Macros::ZERO, &before, &after, &eggs_table());
        assert_eq!(totals.calories, 70.0);
    }
}
