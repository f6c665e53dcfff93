use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Macro-nutrient totals: kilocalories plus grams of each nutrient.
///
/// Accepts the field spellings used by recipe exports (`fats`) and by the
/// daily tracker (`totalCalories`, `carbs`) when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    #[serde(alias = "totalCalories")]
    pub calories: f64,
    #[serde(alias = "carbs")]
    pub carbohydrates: f64,
    pub protein: f64,
    pub fiber: f64,
    #[serde(alias = "fats", default)]
    pub fat: f64,
}

impl Macros {
    pub const ZERO: Self = Self {
        calories: 0.0,
        carbohydrates: 0.0,
        protein: 0.0,
        fiber: 0.0,
        fat: 0.0,
    };

    pub fn new(calories: f64, carbohydrates: f64, protein: f64, fiber: f64, fat: f64) -> Self {
        Self {
            calories,
            carbohydrates,
            protein,
            fiber,
            fat,
        }
    }

    /// Round every field to the nearest integer independently.
    pub fn rounded(&self) -> Self {
        Self {
            calories: self.calories.round(),
            carbohydrates: self.carbohydrates.round(),
            protein: self.protein.round(),
            fiber: self.fiber.round(),
            fat: self.fat.round(),
        }
    }
}

impl Add for Macros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            carbohydrates: self.carbohydrates + rhs.carbohydrates,
            protein: self.protein + rhs.protein,
            fiber: self.fiber + rhs.fiber,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Macros {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            calories: self.calories - rhs.calories,
            carbohydrates: self.carbohydrates - rhs.carbohydrates,
            protein: self.protein - rhs.protein,
            fiber: self.fiber - rhs.fiber,
            fat: self.fat - rhs.fat,
        }
    }
}

impl Mul<f64> for Macros {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            carbohydrates: self.carbohydrates * factor,
            protein: self.protein * factor,
            fiber: self.fiber * factor,
            fat: self.fat * factor,
        }
    }
}

/// Nutrition facts for one unit of an ingredient.
///
/// Tables in the wild frequently omit fat; it defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fiber: f64,
    #[serde(default)]
    pub fat: f64,
}

impl NutritionFacts {
    pub fn per_unit(&self) -> Macros {
        Macros::new(
            self.calories,
            self.carbohydrates,
            self.protein,
            self.fiber,
            self.fat,
        )
    }

    /// Contribution of `quantity` units (may be negative).
    pub fn scaled(&self, quantity: f64) -> Macros {
        self.per_unit() * quantity
    }
}
