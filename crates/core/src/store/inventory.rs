use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::IngredientSnapshot;
use crate::model::quantity::{format_quantity, parse_quantity};

use super::kv::{KeyValueStore, StoreError, load_json, save_json};

pub const INVENTORY_KEY: &str = "foodInventory";

/// A pantry item. `quantity` is display text such as `"6 left"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    /// Days until expiry; zero or negative means expired.
    pub expiry: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

impl FoodItem {
    pub fn expiry_level(&self) -> ExpiryLevel {
        ExpiryLevel::for_days(self.expiry)
    }

    pub fn amount(&self) -> f64 {
        parse_quantity(&self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryLevel {
    Fresh,
    Soon,
    Expired,
}

impl ExpiryLevel {
    pub fn for_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::Expired,
            1..=4 => Self::Soon,
            _ => Self::Fresh,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InventoryFile {
    Wrapped {
        #[serde(rename = "foodItemsData")]
        food_items_data: Vec<FoodItem>,
    },
    Bare(Vec<FoodItem>),
}

/// The household pantry, plus the list it was seeded from.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    items: Vec<FoodItem>,
    original: Vec<FoodItem>,
}

impl InventoryStore {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self {
            original: items.clone(),
            items,
        }
    }

    /// Parse `{"foodItemsData": [...]}` or a bare array of items.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        let file: InventoryFile = serde_json::from_slice(data)?;
        Ok(Self::new(match file {
            InventoryFile::Wrapped { food_items_data } => food_items_data,
            InventoryFile::Bare(items) => items,
        }))
    }

    pub fn get(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn set(&mut self, items: Vec<FoodItem>) {
        self.items = items;
    }

    pub fn reset_to_original(&mut self) {
        self.items = self.original.clone();
    }

    /// Case-insensitive exact name lookup.
    pub fn find(&self, name: &str) -> Option<&FoodItem> {
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Subtract `amount` from the named item, flooring at zero, and rewrite
    /// its quantity as `"<n> left"`. Returns the remaining amount, or `None`
    /// if the pantry has no such item.
    pub fn deduct(&mut self, name: &str, amount: f64) -> Option<f64> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.name.eq_ignore_ascii_case(name))?;
        let remaining = (item.amount() - amount).max(0.0);
        item.quantity = format!("{} left", format_quantity(remaining));
        debug!(item = %item.name, amount, remaining, "inventory deducted");
        Some(remaining)
    }

    /// Deduct every ingredient of a finished recipe. Ingredients missing
    /// from the pantry are ignored.
    pub fn consume(&mut self, ingredients: &[IngredientSnapshot]) {
        for ingredient in ingredients {
            if self
                .deduct(&ingredient.name, parse_quantity(&ingredient.quantity))
                .is_none()
            {
                debug!(ingredient = %ingredient.name, "not in inventory");
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_json(store, INVENTORY_KEY, &self.items)?;
        info!(items = self.items.len(), "inventory saved");
        Ok(())
    }

    /// Replace the current items with the persisted ones, if present.
    /// The seed list used by `reset_to_original` is kept.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<bool, StoreError> {
        let Some(items) = load_json::<Vec<FoodItem>>(store, INVENTORY_KEY)? else {
            return Ok(false);
        };
        info!(items = items.len(), "inventory loaded");
        self.items = items;
        Ok(true)
    }
}
