use serde::{Deserialize, Serialize};

use super::quantity::leading_number_len;

/// One row of a recipe's ingredient list with an editable quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSnapshot {
    pub name: String,
    pub quantity: String,
}

impl IngredientSnapshot {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }

    /// Split a recipe line such as `"2 Eggs"` into name and quantity.
    ///
    /// A line without a leading number gets quantity `"1"`.
    pub fn parse_line(line: &str) -> Self {
        let line = line.trim();
        let len = leading_number_len(line);
        if len == 0 {
            return Self::new(line, "1");
        }
        Self::new(line[len..].trim(), &line[..len])
    }

    /// Snapshot every line of an ingredient list, preserving order.
    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Self> {
        lines.iter().map(|l| Self::parse_line(l.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quantity_and_name() {
        assert_eq!(
            IngredientSnapshot::parse_line("2 Eggs"),
            IngredientSnapshot::new("Eggs", "2")
        );
        assert_eq!(
            IngredientSnapshot::parse_line("1.5 Greek Yoghurt "),
            IngredientSnapshot::new("Greek Yoghurt", "1.5")
        );
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        assert_eq!(
            IngredientSnapshot::parse_line("Salt and pepper"),
            IngredientSnapshot::new("Salt and pepper", "1")
        );
    }

    #[test]
    fn parses_lists_in_order() {
        let list = IngredientSnapshot::parse_lines(&["3 Shrimp", "Bokchoy"]);
        assert_eq!(list[0].name, "Shrimp");
        assert_eq!(list[1].quantity, "1");
    }
}
