use samwich_protocol::Macros;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deck::CardItem;

use super::ingredient::IngredientSnapshot;

#[derive(Debug, Error)]
pub enum RecipeParseError {
    #[error("invalid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A suggested recipe as shown on a swipe card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    /// Asset key of the card image.
    #[serde(default)]
    pub image: String,
    /// Inventory items this recipe uses up, as display text.
    #[serde(default)]
    pub uses: String,
    #[serde(default)]
    pub serves: u32,
    /// How soon the ingredients should be consumed, as display text.
    #[serde(default)]
    pub consume: String,
    /// Lines like `"2 Eggs"`.
    pub ingredients: Vec<String>,
    pub macronutrients: Macros,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn ingredient_snapshot(&self) -> Vec<IngredientSnapshot> {
        IngredientSnapshot::parse_lines(&self.ingredients)
    }
}

impl CardItem for Recipe {
    fn card_id(&self) -> u64 {
        self.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    Wrapped {
        #[serde(rename = "recipeData")]
        recipe_data: Vec<Recipe>,
    },
    Bare(Vec<Recipe>),
}

/// Parse a recipe export: either `{"recipeData": [...]}` or a bare array.
pub fn parse_recipes(data: &[u8]) -> Result<Vec<Recipe>, RecipeParseError> {
    let file: RecipeFile = serde_json::from_slice(data)?;
    Ok(match file {
        RecipeFile::Wrapped { recipe_data } => recipe_data,
        RecipeFile::Bare(recipes) => recipes,
    })
}
