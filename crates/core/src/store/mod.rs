pub mod inventory;
pub mod kv;
pub mod macros;

pub use inventory::{ExpiryLevel, FoodItem, INVENTORY_KEY, InventoryStore};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use macros::{MACROS_KEY, MacroStore};
