use samwich_protocol::Macros;
use tracing::{debug, info};

use super::kv::{KeyValueStore, StoreError, load_json, save_json};

pub const MACROS_KEY: &str = "currentMacros";

/// Running macro totals for the day.
#[derive(Debug, Clone, Default)]
pub struct MacroStore {
    baseline: Macros,
    current: Macros,
}

impl MacroStore {
    pub fn new(baseline: Macros) -> Self {
        Self {
            baseline,
            current: baseline,
        }
    }

    pub fn get(&self) -> Macros {
        self.current
    }

    /// Merge a recipe's contribution into the day's totals.
    pub fn add(&mut self, delta: Macros) -> Macros {
        self.current += delta;
        debug!(?delta, total = ?self.current, "macros added");
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.baseline;
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_json(store, MACROS_KEY, &self.current)?;
        info!("macros saved");
        Ok(())
    }

    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<bool, StoreError> {
        let Some(current) = load_json::<Macros>(store, MACROS_KEY)? else {
            return Ok(false);
        };
        self.current = current;
        info!("macros loaded");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn add_accumulates_and_reset_returns_to_baseline() {
        let mut store = MacroStore::new(Macros::new(1000.0, 100.0, 50.0, 10.0, 30.0));
        let after = store.add(Macros::new(240.0, 22.0, 17.0, 2.0, 11.0));
        assert_eq!(after, Macros::new(1240.0, 122.0, 67.0, 12.0, 41.0));
        assert_eq!(store.get(), after);
        store.reset();
        assert_eq!(store.get().calories, 1000.0);
    }

    #[test]
    fn persists_current_totals() {
        let mut kv = MemoryStore::new();
        let mut store = MacroStore::new(Macros::ZERO);
        store.add(Macros::new(10.0, 1.0, 1.0, 1.0, 1.0));
        store.save(&mut kv).unwrap();

        let mut other = MacroStore::new(Macros::ZERO);
        assert!(other.load(&kv).unwrap());
        assert_eq!(other.get().calories, 10.0);
    }
}
