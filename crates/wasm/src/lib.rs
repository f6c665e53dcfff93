use std::sync::Mutex;

use samwich_core::SamwichConfig;
use samwich_core::model::{IngredientSnapshot, Recipe, parse_recipes};
use samwich_core::nutrition::{DailyGoals, MacroPercents, NutritionTable};
use samwich_core::session::{AdjustSession, DiscoverSession, SessionEvent};
use samwich_core::store::{FoodItem, InventoryStore, MacroStore};
use samwich_protocol::{CardLayer, Macros, SwipeAction, Viewport};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

static SESSIONS: Mutex<Vec<Option<Session>>> = Mutex::new(Vec::new());

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid session handle {0}")]
    InvalidHandle(usize),
    #[error("session table lock poisoned")]
    Poisoned,
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("no recipe is open")]
    NoRecipeOpen,
    #[error(transparent)]
    Recipes(#[from] samwich_core::model::RecipeParseError),
    #[error(transparent)]
    Nutrition(#[from] samwich_core::nutrition::NutritionTableError),
    #[error(transparent)]
    Config(#[from] samwich_core::ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Everything one JavaScript screen needs: the swipe deck, the recipe
/// being adjusted, and the day's pantry and macro totals.
struct Session {
    discover: DiscoverSession<Recipe>,
    table: NutritionTable,
    inventory: InventoryStore,
    macros: MacroStore,
    goals: DailyGoals,
    adjust: Option<AdjustSession>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventJson<'a> {
    action: SwipeAction,
    item_id: u64,
    name: &'a str,
}

#[derive(Serialize)]
struct AdjustJson<'a> {
    id: u64,
    name: &'a str,
    ingredients: &'a [IngredientSnapshot],
    original: &'a [IngredientSnapshot],
    macros: Macros,
    modified: bool,
}

#[derive(Serialize)]
struct TotalsJson {
    macros: Macros,
    percents: MacroPercents,
}

impl Session {
    fn new(
        recipes: &[u8],
        nutrition: &[u8],
        inventory: &[u8],
        config: &SamwichConfig,
        viewport: Viewport,
    ) -> Result<Self, BridgeError> {
        Ok(Self {
            discover: DiscoverSession::new(parse_recipes(recipes)?, viewport, config),
            table: NutritionTable::from_json(nutrition)?,
            inventory: InventoryStore::from_json(inventory)?,
            macros: MacroStore::default(),
            goals: config.daily_goals,
            adjust: None,
        })
    }

    /// Serialize a session event; an opened recipe also becomes the
    /// adjust target.
    fn event_json(&mut self, event: Option<SessionEvent<Recipe>>) -> Result<String, BridgeError> {
        let Some(event) = event else {
            return Ok(String::from("null"));
        };
        let item = event.item();
        let json = serde_json::to_string(&EventJson {
            action: event.action(),
            item_id: item.id,
            name: &item.name,
        })?;
        if let SessionEvent::Opened(recipe) = event {
            self.adjust = Some(AdjustSession::from_recipe(&recipe));
        }
        Ok(json)
    }

    fn adjust_mut(&mut self) -> Result<&mut AdjustSession, BridgeError> {
        self.adjust.as_mut().ok_or(BridgeError::NoRecipeOpen)
    }

    fn adjust_json(&self) -> Result<String, BridgeError> {
        let adjust = self.adjust.as_ref().ok_or(BridgeError::NoRecipeOpen)?;
        Ok(serde_json::to_string(&AdjustJson {
            id: adjust.recipe_id(),
            name: adjust.name(),
            ingredients: adjust.ingredients(),
            original: adjust.original(),
            macros: adjust.current_macros(&self.table),
            modified: adjust.is_modified(),
        })?)
    }

    fn finish(&mut self) -> Result<Macros, BridgeError> {
        let adjust = self.adjust.take().ok_or(BridgeError::NoRecipeOpen)?;
        Ok(adjust.finish(&self.table, &mut self.inventory, &mut self.macros))
    }

    fn totals_json(&self) -> Result<String, BridgeError> {
        let macros = self.macros.get();
        Ok(serde_json::to_string(&TotalsJson {
            macros,
            percents: self.goals.percent_of(&macros),
        })?)
    }
}

fn parse_action(action: &str) -> Result<SwipeAction, BridgeError> {
    match action {
        "dismiss" => Ok(SwipeAction::Dismiss),
        "save" => Ok(SwipeAction::Save),
        "open" => Ok(SwipeAction::Open),
        other => Err(BridgeError::UnknownAction(other.to_string())),
    }
}

fn with_session<R>(
    handle: usize,
    f: impl FnOnce(&mut Session) -> Result<R, BridgeError>,
) -> Result<R, BridgeError> {
    let mut sessions = SESSIONS.lock().map_err(|_| BridgeError::Poisoned)?;
    let session = sessions
        .get_mut(handle)
        .and_then(Option::as_mut)
        .ok_or(BridgeError::InvalidHandle(handle))?;
    f(session)
}

/// Build a session from recipe, nutrition and pantry JSON. Returns a handle
/// for the other calls.
#[wasm_bindgen]
pub fn create_session(
    recipes: &[u8],
    nutrition: &[u8],
    inventory: &[u8],
    config: Option<String>,
    width: f64,
    height: f64,
) -> Result<usize, JsError> {
    let config = match config {
        Some(json) => SamwichConfig::from_json(json.as_bytes()).map_err(BridgeError::from)?,
        None => SamwichConfig::default(),
    };
    let session = Session::new(
        recipes,
        nutrition,
        inventory,
        &config,
        Viewport::new(width, height),
    )?;
    let mut sessions = SESSIONS.lock().map_err(|_| BridgeError::Poisoned)?;
    Ok(insert_session(&mut sessions, session))
}

/// Store `session` in the first free slot, growing the table only when
/// every handle is live.
fn insert_session(sessions: &mut Vec<Option<Session>>, session: Session) -> usize {
    match sessions.iter().position(Option::is_none) {
        Some(handle) => {
            sessions[handle] = Some(session);
            handle
        }
        None => {
            sessions.push(Some(session));
            sessions.len() - 1
        }
    }
}

#[wasm_bindgen]
pub fn close_session(handle: usize) -> Result<(), JsError> {
    let mut sessions = SESSIONS.lock().map_err(|_| BridgeError::Poisoned)?;
    let slot = sessions
        .get_mut(handle)
        .ok_or(BridgeError::InvalidHandle(handle))?;
    *slot = None;
    Ok(())
}

#[wasm_bindgen]
pub fn set_viewport(handle: usize, width: f64, height: f64) -> Result<(), JsError> {
    Ok(with_session(handle, |s| {
        s.discover.set_viewport(Viewport::new(width, height));
        Ok(())
    })?)
}

/// Pointer down on the top card.
#[wasm_bindgen]
pub fn press(handle: usize) -> Result<bool, JsError> {
    Ok(with_session(handle, |s| Ok(s.discover.press()))?)
}

/// Cumulative drag translation since `press`.
#[wasm_bindgen]
pub fn drag(handle: usize, translation_x: f64, translation_y: f64) -> Result<(), JsError> {
    Ok(with_session(handle, |s| {
        s.discover.drag(translation_x, translation_y);
        Ok(())
    })?)
}

/// Pointer up. Returns the decision as JSON, or `null`.
#[wasm_bindgen]
pub fn release(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        let event = s.discover.release();
        s.event_json(event)
    })?)
}

#[wasm_bindgen]
pub fn tap(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        let event = s.discover.tap();
        s.event_json(event)
    })?)
}

/// On-screen buttons: `"dismiss"`, `"save"` or `"open"`.
#[wasm_bindgen]
pub fn trigger(handle: usize, action: &str) -> Result<String, JsError> {
    let action = parse_action(action)?;
    Ok(with_session(handle, |s| {
        let event = s.discover.trigger(action);
        s.event_json(event)
    })?)
}

/// Undo the last decision. Returns the restored recipe id.
#[wasm_bindgen]
pub fn revert(handle: usize) -> Result<Option<u64>, JsError> {
    Ok(with_session(handle, |s| Ok(s.discover.revert().map(|r| r.id)))?)
}

#[wasm_bindgen]
pub fn refill(handle: usize, recipes: &[u8]) -> Result<(), JsError> {
    let recipes = parse_recipes(recipes).map_err(BridgeError::from)?;
    Ok(with_session(handle, |s| {
        s.discover.refill(recipes);
        Ok(())
    })?)
}

/// Advance animations by `dt` seconds; `true` while anything moves.
#[wasm_bindgen]
pub fn tick(handle: usize, dt: f64) -> Result<bool, JsError> {
    Ok(with_session(handle, |s| Ok(s.discover.tick(dt)))?)
}

/// Card layers back to front, as JSON.
#[wasm_bindgen]
pub fn layers(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        let layers: Vec<CardLayer> = s.discover.layers();
        Ok(serde_json::to_string(&layers)?)
    })?)
}

#[wasm_bindgen]
pub fn drag_hint(handle: usize) -> Result<Option<String>, JsError> {
    Ok(with_session(handle, |s| {
        Ok(s.discover.drag_hint().map(|action| action.to_string()))
    })?)
}

#[wasm_bindgen]
pub fn progress(handle: usize) -> Result<f64, JsError> {
    Ok(with_session(handle, |s| Ok(s.discover.progress()))?)
}

/// Full recipe JSON for a card id, for drawing card faces.
#[wasm_bindgen]
pub fn recipe(handle: usize, id: u64) -> Result<Option<String>, JsError> {
    Ok(with_session(handle, |s| {
        let deck = s.discover.deck();
        let found = deck.pending().chain(deck.history()).find(|r| r.id == id);
        found
            .map(serde_json::to_string)
            .transpose()
            .map_err(BridgeError::from)
    })?)
}

#[wasm_bindgen]
pub fn saved(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| Ok(serde_json::to_string(s.discover.saved())?))?)
}

#[wasm_bindgen]
pub fn start_tutorial(handle: usize) -> Result<(), JsError> {
    Ok(with_session(handle, |s| {
        s.discover.start_tutorial();
        Ok(())
    })?)
}

#[wasm_bindgen]
pub fn tutorial_next(handle: usize) -> Result<bool, JsError> {
    Ok(with_session(handle, |s| Ok(s.discover.tutorial_next()))?)
}

/// Current tutorial prompt, or `None` once closed.
#[wasm_bindgen]
pub fn tutorial_prompt(handle: usize) -> Result<Option<String>, JsError> {
    Ok(with_session(handle, |s| {
        Ok(s.discover.tutorial().step().map(|step| step.prompt().to_string()))
    })?)
}

#[wasm_bindgen]
pub fn adjust_state(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| s.adjust_json())?)
}

#[wasm_bindgen]
pub fn adjust_increment(handle: usize, index: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        s.adjust_mut()?.increment(index);
        s.adjust_json()
    })?)
}

#[wasm_bindgen]
pub fn adjust_decrement(handle: usize, index: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        s.adjust_mut()?.decrement(index);
        s.adjust_json()
    })?)
}

#[wasm_bindgen]
pub fn adjust_set_quantity(handle: usize, index: usize, quantity: String) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        s.adjust_mut()?.set_quantity(index, quantity);
        s.adjust_json()
    })?)
}

#[wasm_bindgen]
pub fn adjust_reset(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        s.adjust_mut()?.reset_edits();
        s.adjust_json()
    })?)
}

/// Cook the open recipe. Returns the day's totals and goal percentages.
#[wasm_bindgen]
pub fn adjust_finish(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        s.finish()?;
        s.totals_json()
    })?)
}

#[wasm_bindgen]
pub fn inventory(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| {
        let items: &[FoodItem] = s.inventory.get();
        Ok(serde_json::to_string(items)?)
    })?)
}

#[wasm_bindgen]
pub fn totals(handle: usize) -> Result<String, JsError> {
    Ok(with_session(handle, |s| s.totals_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPES: &[u8] = br#"[{"id": 1, "name": "Toast", "ingredients": ["2 Bread"],
        "macronutrients": {"calories": 160, "carbohydrates": 30, "protein": 6, "fiber": 2, "fat": 2}}]"#;
    const NUTRITION: &[u8] =
        br#"{"Bread": {"calories": 80, "carbohydrates": 15, "protein": 3, "fiber": 1, "fat": 1}}"#;
    const INVENTORY: &[u8] =
        br#"[{"id": "1", "name": "Bread", "quantity": "4 left", "expiry": 3}]"#;

    fn session() -> Session {
        Session::new(
            RECIPES,
            NUTRITION,
            INVENTORY,
            &SamwichConfig::default(),
            Viewport::new(400.0, 800.0),
        )
        .unwrap()
    }

    #[test]
    fn tap_opens_recipe_for_adjusting() {
        let mut s = session();
        let event = s.discover.tap();
        let json = s.event_json(event).unwrap();
        assert_eq!(json, r#"{"action":"open","itemId":1,"name":"Toast"}"#);

        s.adjust_mut().unwrap().increment(0);
        let macros = s.finish().unwrap();
        assert_eq!(macros.calories, 240.0);
        assert_eq!(s.inventory.get()[0].quantity, "1 left");
        assert!(matches!(s.finish(), Err(BridgeError::NoRecipeOpen)));
    }

    #[test]
    fn no_event_serializes_as_null() {
        let mut s = session();
        assert_eq!(s.event_json(None).unwrap(), "null");
    }

    #[test]
    fn actions_parse() {
        assert_eq!(parse_action("save").unwrap(), SwipeAction::Save);
        assert!(parse_action("share").is_err());
    }

    #[test]
    fn closed_handles_are_reused() {
        let mut sessions = Vec::new();
        assert_eq!(insert_session(&mut sessions, session()), 0);
        assert_eq!(insert_session(&mut sessions, session()), 1);
        sessions[0] = None;
        assert_eq!(insert_session(&mut sessions, session()), 0);
        assert_eq!(insert_session(&mut sessions, session()), 2);
        assert_eq!(sessions.len(), 3);
    }

    #[test]
    fn bad_handles_are_errors() {
        assert!(matches!(
            with_session(usize::MAX, |_| Ok(())),
            Err(BridgeError::InvalidHandle(_))
        ));
    }
}
