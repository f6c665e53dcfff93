use samwich_protocol::Macros;
use tracing::info;

use crate::model::quantity::{step_down, step_up};
use crate::model::{IngredientSnapshot, Recipe};
use crate::nutrition::{NutritionLookup, recalculate};
use crate::store::{InventoryStore, MacroStore};

/// Editing state for one opened recipe: the ingredient quantities as
/// published and as the user has changed them.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustSession {
    recipe_id: u64,
    name: String,
    original_macros: Macros,
    original: Vec<IngredientSnapshot>,
    edited: Vec<IngredientSnapshot>,
}

impl AdjustSession {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self::new(
            recipe.id,
            recipe.name.clone(),
            recipe.macronutrients,
            recipe.ingredient_snapshot(),
        )
    }

    pub fn new(
        recipe_id: u64,
        name: impl Into<String>,
        original_macros: Macros,
        ingredients: Vec<IngredientSnapshot>,
    ) -> Self {
        Self {
            recipe_id,
            name: name.into(),
            original_macros,
            edited: ingredients.clone(),
            original: ingredients,
        }
    }

    pub fn recipe_id(&self) -> u64 {
        self.recipe_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_macros(&self) -> Macros {
        self.original_macros
    }

    pub fn original(&self) -> &[IngredientSnapshot] {
        &self.original
    }

    pub fn ingredients(&self) -> &[IngredientSnapshot] {
        &self.edited
    }

    pub fn increment(&mut self, index: usize) -> Option<&str> {
        let row = self.edited.get_mut(index)?;
        row.quantity = step_up(&row.quantity);
        Some(&row.quantity)
    }

    /// Never goes below one unit.
    pub fn decrement(&mut self, index: usize) -> Option<&str> {
        let row = self.edited.get_mut(index)?;
        row.quantity = step_down(&row.quantity);
        Some(&row.quantity)
    }

    /// Free-text edit. Returns `false` for an out-of-range row.
    pub fn set_quantity(&mut self, index: usize, quantity: impl Into<String>) -> bool {
        match self.edited.get_mut(index) {
            Some(row) => {
                row.quantity = quantity.into();
                true
            }
            None => false,
        }
    }

    pub fn reset_edits(&mut self) {
        self.edited.clone_from(&self.original);
    }

    pub fn is_modified(&self) -> bool {
        self.edited != self.original
    }

    /// Totals for the current edits.
    pub fn current_macros(&self, lookup: &impl NutritionLookup) -> Macros {
        recalculate(&self.original_macros, &self.original, &self.edited, lookup)
    }

    /// The user cooked it: add the totals to today's macros and take the
    /// edited quantities out of the pantry.
    pub fn finish(
        self,
        lookup: &impl NutritionLookup,
        inventory: &mut InventoryStore,
        macros: &mut MacroStore,
    ) -> Macros {
        let totals = self.current_macros(lookup);
        macros.add(totals);
        inventory.consume(&self.edited);
        info!(recipe = self.recipe_id, name = %self.name, "recipe finished");
        totals
    }
}
