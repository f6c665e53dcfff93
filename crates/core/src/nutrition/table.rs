use samwich_protocol::NutritionFacts;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutritionTableError {
    #[error("invalid nutrition JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("nutrition table must be a JSON object keyed by ingredient name")]
    NotAnObject,
    #[error("bad facts for {name:?}: {source}")]
    Entry {
        name: String,
        source: serde_json::Error,
    },
}

/// Source of per-unit nutrition facts by ingredient name.
pub trait NutritionLookup {
    fn facts_of(&self, name: &str) -> Option<NutritionFacts>;
}

/// Lowercase and drop everything that is not alphanumeric.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    name: String,
    facts: NutritionFacts,
}

/// Static ingredient → per-unit facts table with fuzzy name matching.
///
/// Keys are the lowercased table names; the ingredient name is normalized
/// with [`normalize_name`]. Lookup tries, in order: exact key, a key
/// contained in the name, the name contained in a key. Within each tier the
/// first entry in table order wins, so `"pepper"` resolves to whichever
/// pepper was listed first. A multi-word key keeps its spaces and so never
/// matches a normalized multi-word name.
#[derive(Debug, Clone, Default)]
pub struct NutritionTable {
    entries: Vec<Entry>,
}

impl NutritionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, facts)` pairs. Empty names are skipped, since an
    /// empty key would match every ingredient.
    pub fn from_entries<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, NutritionFacts)>,
    ) -> Self {
        let mut table = Self::new();
        for (name, facts) in entries {
            table.insert(name, facts);
        }
        table
    }

    /// Parse `{"Eggs": {"calories": 70, ...}, ...}`, keeping document order.
    pub fn from_json(data: &[u8]) -> Result<Self, NutritionTableError> {
        let value: Value = serde_json::from_slice(data)?;
        let Value::Object(map) = value else {
            return Err(NutritionTableError::NotAnObject);
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, NutritionTableError> {
        let mut table = Self::new();
        for (name, value) in map {
            let facts: NutritionFacts = serde_json::from_value(value)
                .map_err(|source| NutritionTableError::Entry {
                    name: name.clone(),
                    source,
                })?;
            table.insert(name, facts);
        }
        Ok(table)
    }

    pub fn insert(&mut self, name: impl Into<String>, facts: NutritionFacts) {
        let name = name.into();
        let key = name.to_lowercase();
        if key.trim().is_empty() {
            return;
        }
        self.entries.push(Entry { key, name, facts });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name of the entry `name` resolves to.
    pub fn matched_name(&self, name: &str) -> Option<&str> {
        self.find(name).map(|e| e.name.as_str())
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.key == wanted)
            .or_else(|| self.entries.iter().find(|e| wanted.contains(&e.key)))
            .or_else(|| self.entries.iter().find(|e| e.key.contains(&wanted)))
    }
}

impl NutritionLookup for NutritionTable {
    fn facts_of(&self, name: &str) -> Option<NutritionFacts> {
        self.find(name).map(|e| e.facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(calories: f64) -> NutritionFacts {
        NutritionFacts {
            calories,
            ..Default::default()
        }
    }

    fn table() -> NutritionTable {
        NutritionTable::from_entries([
            ("Bellpepper", facts(1.0)),
            ("Blackpepper", facts(2.0)),
            ("Egg", facts(3.0)),
            ("Eggplant", facts(4.0)),
        ])
    }

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_name("Greek Yoghurt (2%)"), "greekyoghurt2");
        assert_eq!(normalize_name("  "), "");
    }

    #[test]
    fn exact_match_beats_fuzzy() {
        let t = table();
        assert_eq!(t.facts_of("EGGPLANT").unwrap().calories, 4.0);
        assert_eq!(t.facts_of("bell-pepper").unwrap().calories, 1.0);
    }

    #[test]
    fn keys_are_lowercased_but_keep_spaces() {
        let t = NutritionTable::from_entries([
            ("Bell Pepper", facts(1.0)),
            ("Rice", facts(2.0)),
            (" ", facts(3.0)),
        ]);
        assert_eq!(t.len(), 2);
        assert!(t.facts_of("Bell Pepper").is_none());
        assert!(t.facts_of("bell pepper").is_none());
        assert_eq!(t.matched_name("Brown RICE"), Some("Rice"));
    }

    #[test]
    fn key_contained_in_name() {
        assert_eq!(table().matched_name("Free range eggs"), Some("Egg"));
    }

    #[test]
    fn name_contained_in_key_takes_first_in_order() {
        assert_eq!(table().matched_name("pepper"), Some("Bellpepper"));
    }

    #[test]
    fn unknown_or_empty_names_miss() {
        let t = table();
        assert!(t.facts_of("tofu").is_none());
        assert!(t.facts_of("!!").is_none());
    }

    #[test]
    fn json_keeps_document_order() {
        let t = NutritionTable::from_json(
            br#"{"Black Pepper": {"calories": 2, "carbohydrates": 0, "protein": 0, "fiber": 0},
                 "Bell Pepper": {"calories": 1, "carbohydrates": 0, "protein": 0, "fiber": 0}}"#,
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.matched_name("pepper"), Some("Black Pepper"));
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(
            NutritionTable::from_json(b"[]"),
            Err(NutritionTableError::NotAnObject)
        ));
        assert!(matches!(
            NutritionTable::from_json(br#"{"Egg": {"calories": "lots"}}"#),
            Err(NutritionTableError::Entry { .. })
        ));
    }
}
