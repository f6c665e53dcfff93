pub mod ingredient;
pub mod quantity;
pub mod recipe;

pub use ingredient::IngredientSnapshot;
pub use recipe::{Recipe, RecipeParseError, parse_recipes};
