use samwich_protocol::Macros;
use serde::{Deserialize, Serialize};

/// Daily intake targets the macro bars are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyGoals {
    pub calories: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fiber: f64,
    pub fat: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            carbohydrates: 200.0,
            protein: 80.0,
            fiber: 30.0,
            fat: 60.0,
        }
    }
}

/// Whole-number percentages of each daily goal. Not capped; renderers
/// clamp bar widths themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MacroPercents {
    pub calories: i64,
    pub carbohydrates: i64,
    pub protein: i64,
    pub fiber: i64,
    pub fat: i64,
}

fn percent(value: f64, goal: f64) -> i64 {
    if goal <= 0.0 {
        return 0;
    }
    (value / goal * 100.0).round() as i64
}

impl DailyGoals {
    pub fn percent_of(&self, macros: &Macros) -> MacroPercents {
        MacroPercents {
            calories: percent(macros.calories, self.calories),
            carbohydrates: percent(macros.carbohydrates, self.carbohydrates),
            protein: percent(macros.protein, self.protein),
            fiber: percent(macros.fiber, self.fiber),
            fat: percent(macros.fat, self.fat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_against_defaults() {
        let p = DailyGoals::default().percent_of(&Macros::new(500.0, 50.0, 100.0, 10.0, 15.0));
        assert_eq!(
            p,
            MacroPercents {
                calories: 25,
                carbohydrates: 25,
                protein: 125,
                fiber: 33,
                fat: 25,
            }
        );
    }

    #[test]
    fn zero_goal_reads_as_zero() {
        let goals = DailyGoals {
            fiber: 0.0,
            ..Default::default()
        };
        assert_eq!(goals.percent_of(&Macros::new(0.0, 0.0, 0.0, 12.0, 0.0)).fiber, 0);
    }
}
