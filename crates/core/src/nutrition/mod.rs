pub mod goals;
pub mod recalc;
pub mod table;

pub use goals::{DailyGoals, MacroPercents};
pub use recalc::recalculate;
pub use table::{NutritionLookup, NutritionTable, NutritionTableError, normalize_name};
