use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use samwich_core::SamwichConfig;
use samwich_core::model::Recipe;
use samwich_core::nutrition::{DailyGoals, NutritionTable};
use samwich_core::session::{AdjustSession, DiscoverSession, SessionEvent};
use samwich_core::store::{InventoryStore, KeyValueStore, MacroStore};
use samwich_protocol::{SwipeAction, Viewport};
use tracing::{error, info};

/// Terminal rows are roughly twice as tall as columns are wide; gesture
/// space counts one column and half a row as one unit.
pub const ROW_ASPECT: f64 = 2.0;

/// How far a key-synthesized swipe drags, as a fraction of the card area.
const KEY_SWIPE_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Discover,
    Adjust(AdjustSession),
    Pantry,
    Macros,
}

#[derive(Debug, Clone, Copy)]
struct Pointer {
    column: u16,
    row: u16,
    moved: bool,
}

pub struct App {
    pub recipes: Vec<Recipe>,
    pub discover: DiscoverSession<Recipe>,
    pub table: NutritionTable,
    pub inventory: InventoryStore,
    pub macros: MacroStore,
    pub goals: DailyGoals,
    pub screen: Screen,
    /// Highlighted ingredient row on the adjust screen.
    pub selected: usize,
    pub status: String,
    store: Box<dyn KeyValueStore>,
    card_area: Rect,
    pointer: Option<Pointer>,
    should_quit: bool,
}

impl App {
    pub fn new(
        recipes: Vec<Recipe>,
        table: NutritionTable,
        inventory: InventoryStore,
        macros: MacroStore,
        store: Box<dyn KeyValueStore>,
        config: &SamwichConfig,
    ) -> Self {
        let card_area = Rect::new(0, 0, 40, 16);
        let discover =
            DiscoverSession::new(recipes.clone(), viewport_of(card_area), config);
        Self {
            recipes,
            discover,
            table,
            inventory,
            macros,
            goals: config.daily_goals,
            screen: Screen::Discover,
            selected: 0,
            status: String::from("Drag a card, or use the arrow keys"),
            store,
            card_area,
            pointer: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn recipe(&self, id: u64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn card_area(&self) -> Rect {
        self.card_area
    }

    /// Called by the renderer each frame with the space cards are drawn in.
    pub fn set_card_area(&mut self, area: Rect) {
        if area == self.card_area {
            return;
        }
        self.card_area = area;
        self.discover.set_viewport(viewport_of(area));
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.discover.tick(dt)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('q') = key.code {
            self.should_quit = true;
            return;
        }
        match &self.screen {
            Screen::Discover => self.discover_key(key.code),
            Screen::Adjust(_) => self.adjust_key(key.code),
            Screen::Pantry | Screen::Macros => self.overview_key(key.code),
        }
    }

    fn discover_key(&mut self, code: KeyCode) {
        let width = f64::from(self.card_area.width) * KEY_SWIPE_FRACTION;
        let height = f64::from(self.card_area.height) * ROW_ASPECT * KEY_SWIPE_FRACTION;
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.synthesize_swipe(-width, 0.0),
            KeyCode::Right => self.synthesize_swipe(width, 0.0),
            KeyCode::Up => self.synthesize_swipe(0.0, -height),
            KeyCode::Down => self.synthesize_swipe(0.0, height),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let event = self.discover.tap();
                self.on_event(event);
            }
            KeyCode::Char('d') => self.trigger(SwipeAction::Dismiss),
            KeyCode::Char('s') => self.trigger(SwipeAction::Save),
            KeyCode::Char('o') => self.trigger(SwipeAction::Open),
            KeyCode::Char('u') => {
                self.status = match self.discover.revert() {
                    Some(recipe) => format!("Brought back {}", recipe.name),
                    None => String::from("Nothing to undo"),
                };
            }
            KeyCode::Char('r') => {
                self.discover.refill(self.recipes.clone());
                self.status = String::from("Deck refreshed");
            }
            KeyCode::Char('t') => self.discover.start_tutorial(),
            KeyCode::Char('n') => {
                self.discover.tutorial_next();
            }
            KeyCode::Char('x') => self.discover.close_tutorial(),
            KeyCode::Char('p') => self.screen = Screen::Pantry,
            KeyCode::Char('m') => self.screen = Screen::Macros,
            _ => {}
        }
    }

    fn adjust_key(&mut self, code: KeyCode) {
        let Screen::Adjust(adjust) = &mut self.screen else {
            return;
        };
        let rows = adjust.ingredients().len();
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Discover;
                self.selected = 0;
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down if self.selected + 1 < rows => self.selected += 1,
            KeyCode::Right | KeyCode::Char('+') => {
                adjust.increment(self.selected);
            }
            KeyCode::Left | KeyCode::Char('-') => {
                adjust.decrement(self.selected);
            }
            KeyCode::Char('x') => adjust.reset_edits(),
            KeyCode::Enter => self.finish_recipe(),
            _ => {}
        }
    }

    fn overview_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.screen = Screen::Discover,
            KeyCode::Char('p') => self.screen = Screen::Pantry,
            KeyCode::Char('m') => self.screen = Screen::Macros,
            KeyCode::Char('R') if self.screen == Screen::Pantry => {
                self.inventory.reset_to_original();
                self.persist();
                self.status = String::from("Pantry restored");
            }
            KeyCode::Char('R') => {
                self.macros.reset();
                self.persist();
                self.status = String::from("Macros reset");
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Discover {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = self
                    .card_area
                    .contains(Position::new(mouse.column, mouse.row));
                if inside && self.discover.press() {
                    self.pointer = Some(Pointer {
                        column: mouse.column,
                        row: mouse.row,
                        moved: false,
                    });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(pointer) = self.pointer.as_mut() else {
                    return;
                };
                let dx = f64::from(mouse.column) - f64::from(pointer.column);
                let dy = (f64::from(mouse.row) - f64::from(pointer.row)) * ROW_ASPECT;
                pointer.moved |= dx != 0.0 || dy != 0.0;
                self.discover.drag(dx, dy);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(pointer) = self.pointer.take() else {
                    return;
                };
                let event = self.discover.release();
                if pointer.moved {
                    self.on_event(event);
                } else {
                    let event = self.discover.tap();
                    self.on_event(event);
                }
            }
            _ => {}
        }
    }

    fn synthesize_swipe(&mut self, dx: f64, dy: f64) {
        if !self.discover.press() {
            return;
        }
        self.discover.drag(dx, dy);
        let event = self.discover.release();
        self.on_event(event);
    }

    fn trigger(&mut self, action: SwipeAction) {
        let event = self.discover.trigger(action);
        self.on_event(event);
    }

    fn on_event(&mut self, event: Option<SessionEvent<Recipe>>) {
        let Some(event) = event else {
            return;
        };
        self.status = match &event {
            SessionEvent::Dismissed(recipe) => format!("Skipped {}", recipe.name),
            SessionEvent::Saved(recipe) => format!("Saved {}", recipe.name),
            SessionEvent::Opened(recipe) => format!("Opened {}", recipe.name),
        };
        if let SessionEvent::Opened(recipe) = event {
            self.selected = 0;
            self.screen = Screen::Adjust(AdjustSession::from_recipe(&recipe));
        }
    }

    fn finish_recipe(&mut self) {
        let screen = std::mem::replace(&mut self.screen, Screen::Macros);
        let Screen::Adjust(adjust) = screen else {
            self.screen = screen;
            return;
        };
        let name = adjust.name().to_string();
        let totals = adjust.finish(&self.table, &mut self.inventory, &mut self.macros);
        self.selected = 0;
        self.status = format!("Cooked {name}: {} kcal", totals.calories);
        self.persist();
    }

    fn persist(&mut self) {
        let result = self
            .inventory
            .save(self.store.as_mut())
            .and_then(|()| self.macros.save(self.store.as_mut()));
        match result {
            Ok(()) => info!("state persisted"),
            Err(err) => {
                error!(%err, "failed to persist state");
                self.status = format!("Could not save: {err}");
            }
        }
    }
}

fn viewport_of(area: Rect) -> Viewport {
    Viewport::new(
        f64::from(area.width),
        f64::from(area.height) * ROW_ASPECT,
    )
}
