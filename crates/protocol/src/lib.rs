pub mod card;
pub mod gesture;
pub mod nutrition;
pub mod theme;
pub mod types;

pub use card::{CardLayer, CardTransform};
pub use gesture::{SwipeAction, SwipeDirection};
pub use nutrition::{Macros, NutritionFacts};
pub use theme::ThemeToken;
pub use types::{Point, Viewport};
