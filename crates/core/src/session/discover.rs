use samwich_protocol::{CardLayer, SwipeAction, SwipeDirection, Viewport};
use tracing::debug;

use crate::config::SamwichConfig;
use crate::deck::{CardDeck, CardItem};
use crate::gesture::{CardStyle, SpringConfig, SwipeCardController, SwipePolicy};
use crate::tutorial::{SwipeTutorial, TutorialInput};

/// Outcome of a decided card, routed by the host (navigate, persist, or
/// drop).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent<T> {
    Dismissed(T),
    Saved(T),
    Opened(T),
}

impl<T> SessionEvent<T> {
    pub fn action(&self) -> SwipeAction {
        match self {
            Self::Dismissed(_) => SwipeAction::Dismiss,
            Self::Saved(_) => SwipeAction::Save,
            Self::Opened(_) => SwipeAction::Open,
        }
    }

    pub fn item(&self) -> &T {
        match self {
            Self::Dismissed(item) | Self::Saved(item) | Self::Opened(item) => item,
        }
    }

    pub fn into_item(self) -> T {
        match self {
            Self::Dismissed(item) | Self::Saved(item) | Self::Opened(item) => item,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    id: u64,
    controller: SwipeCardController,
}

/// The recipe discovery screen: a deck, one gesture controller per rendered
/// card, and the direction policy tying them together.
///
/// All methods are meant to be called from the host's UI thread in event
/// order; nothing here blocks.
#[derive(Debug, Clone)]
pub struct DiscoverSession<T> {
    deck: CardDeck<T>,
    policy: SwipePolicy,
    viewport: Viewport,
    springs: SpringConfig,
    style: CardStyle,
    /// Controllers for `deck.window()`, topmost first.
    cards: Vec<Slot>,
    /// Decided cards still flying off-screen.
    departing: Vec<Slot>,
    saved: Vec<T>,
    tutorial: SwipeTutorial,
}

impl<T: CardItem + Clone> DiscoverSession<T> {
    pub fn new(items: impl IntoIterator<Item = T>, viewport: Viewport, config: &SamwichConfig) -> Self {
        let mut session = Self {
            deck: CardDeck::from_items(items, config.deck_window),
            policy: config.policy,
            viewport,
            springs: config.spring,
            style: config.card_style,
            cards: Vec::new(),
            departing: Vec::new(),
            saved: Vec::new(),
            tutorial: SwipeTutorial::default(),
        };
        session.sync_window();
        session
    }

    pub fn deck(&self) -> &CardDeck<T> {
        &self.deck
    }

    pub fn policy(&self) -> &SwipePolicy {
        &self.policy
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn top(&self) -> Option<&T> {
        self.deck.top()
    }

    pub fn saved(&self) -> &[T] {
        &self.saved
    }

    pub fn progress(&self) -> f64 {
        self.deck.progress_fraction()
    }

    pub fn tutorial(&self) -> &SwipeTutorial {
        &self.tutorial
    }

    pub fn start_tutorial(&mut self) {
        self.tutorial.start();
    }

    pub fn close_tutorial(&mut self) {
        self.tutorial.close();
    }

    /// The walkthrough's "next" button.
    pub fn tutorial_next(&mut self) -> bool {
        self.tutorial.observe(TutorialInput::Next)
    }

    /// Change the layout surface. Cards on the stack snap back to rest.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.cards.clear();
        self.sync_window();
    }

    /// Finger down on the top card.
    pub fn press(&mut self) -> bool {
        self.cards
            .first_mut()
            .is_some_and(|slot| slot.controller.begin())
    }

    /// Cumulative displacement since `press`.
    pub fn drag(&mut self, translation_x: f64, translation_y: f64) {
        if let Some(slot) = self.cards.first_mut() {
            slot.controller.update(translation_x, translation_y);
        }
    }

    /// The action a release right now would trigger, for drag hints.
    pub fn drag_hint(&self) -> Option<SwipeAction> {
        let direction = self.cards.first()?.controller.pending_direction()?;
        Some(self.policy.resolve(direction))
    }

    /// Finger up. Decides the top card if the drag crossed a threshold.
    pub fn release(&mut self) -> Option<SessionEvent<T>> {
        let direction = self.cards.first_mut()?.controller.end()?;
        let action = self.policy.resolve(direction);
        self.commit(direction, action)
    }

    pub fn tap(&mut self) -> Option<SessionEvent<T>> {
        let direction = self.cards.first()?.controller.tap()?;
        let action = self.policy.resolve(direction);
        if !action.is_assigned() {
            return None;
        }
        self.commit(direction, action)
    }

    /// Perform `action` on the top card without a gesture (the on-screen
    /// buttons). The card flies off along the policy's direction for that
    /// action, if it has one.
    pub fn trigger(&mut self, action: SwipeAction) -> Option<SessionEvent<T>> {
        if !action.is_assigned() {
            return None;
        }
        let slot = self.cards.first_mut()?;
        if !slot.controller.is_enabled() {
            return None;
        }
        let direction = self.policy.direction_for(action);
        if let Some(direction) = direction {
            slot.controller.fling(direction);
        }
        self.commit(direction.unwrap_or(SwipeDirection::Tap), action)
    }

    fn commit(&mut self, direction: SwipeDirection, action: SwipeAction) -> Option<SessionEvent<T>> {
        let decided = self.deck.decide(direction)?;
        if !self.cards.is_empty() {
            let slot = self.cards.remove(0);
            if direction != SwipeDirection::Tap && slot.controller.departed().is_some() {
                self.departing.push(slot);
            }
        }
        self.sync_window();
        self.tutorial.observe(TutorialInput::Action(action));

        let item = decided.item;
        debug!(card = item.card_id(), %direction, %action, "session event");
        match action {
            SwipeAction::Dismiss => Some(SessionEvent::Dismissed(item)),
            SwipeAction::Save => {
                if !self.saved.iter().any(|s| s.card_id() == item.card_id()) {
                    self.saved.push(item.clone());
                }
                Some(SessionEvent::Saved(item))
            }
            SwipeAction::Open => Some(SessionEvent::Opened(item)),
            SwipeAction::Unassigned => None,
        }
    }

    /// Bring back the last decided card. A card that had been saved is
    /// removed from the saved list again.
    pub fn revert(&mut self) -> Option<&T> {
        let id = self.deck.revert()?.card_id();
        self.departing.retain(|slot| slot.id != id);
        self.saved.retain(|item| item.card_id() != id);
        self.cards.retain(|slot| slot.id != id);
        self.sync_window();
        self.tutorial.observe(TutorialInput::Revert);
        self.deck.top()
    }

    /// Replace the deck contents. Undecided and historical cards are lost;
    /// the saved list is kept.
    pub fn refill(&mut self, items: impl IntoIterator<Item = T>) {
        self.deck.refill(items);
        self.cards.clear();
        self.departing.clear();
        self.sync_window();
    }

    /// Advance every animation by `dt` seconds. Returns `true` while
    /// anything is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut moving = false;
        for slot in &mut self.cards {
            moving |= slot.controller.tick(dt);
        }
        self.departing.retain_mut(|slot| slot.controller.tick(dt));
        moving || !self.departing.is_empty()
    }

    /// Card layers back to front: the window bottom-up, then departing
    /// cards above everything.
    pub fn layers(&self) -> Vec<CardLayer> {
        let stacked = self.cards.iter().rev().map(|slot| (slot, false));
        let departing = self.departing.iter().map(|slot| (slot, true));
        stacked
            .chain(departing)
            .enumerate()
            .map(|(z, (slot, departing))| CardLayer {
                item_id: slot.id,
                transform: slot.controller.transform(),
                z_index: z as u32,
                enabled: slot.controller.is_enabled(),
                departing,
            })
            .collect()
    }

    /// Realign controllers with the deck window, keeping the state of
    /// cards that stay visible.
    fn sync_window(&mut self) {
        let mut previous = std::mem::take(&mut self.cards);
        let mut cards = Vec::with_capacity(self.deck.window_size());
        for (index, item) in self.deck.window().enumerate() {
            let id = item.card_id();
            let is_top = index == 0;
            let mut slot = match previous.iter().position(|slot| slot.id == id) {
                Some(pos) => previous.swap_remove(pos),
                None => Slot {
                    id,
                    controller: SwipeCardController::new(
                        self.viewport,
                        self.policy.enabled_swipes(),
                        self.springs,
                        self.style,
                        is_top,
                    ),
                },
            };
            slot.controller.set_top(is_top);
            cards.push(slot);
        }
        self.cards = cards;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PolicyPreset;

    #[derive(Debug, Clone, PartialEq)]
    struct Card(u64);

    impl CardItem for Card {
        fn card_id(&self) -> u64 {
            self.0
        }
    }

    fn session(n: u64) -> DiscoverSession<Card> {
        DiscoverSession::new(
            (1..=n).map(Card),
            Viewport::new(400.0, 800.0),
            &SamwichConfig::default(),
        )
    }

    fn swipe(s: &mut DiscoverSession<Card>, x: f64, y: f64) -> Option<SessionEvent<Card>> {
        assert!(s.press());
        s.drag(x, y);
        s.release()
    }

    fn settle(s: &mut DiscoverSession<Card>) {
        for _ in 0..2_000 {
            if !s.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn swipes_route_through_policy() {
        let mut s = session(4);
        assert_eq!(swipe(&mut s, -200.0, 0.0), Some(SessionEvent::Dismissed(Card(1))));
        assert_eq!(swipe(&mut s, 0.0, 200.0), Some(SessionEvent::Saved(Card(2))));
        assert_eq!(swipe(&mut s, 200.0, 0.0), Some(SessionEvent::Opened(Card(3))));
        assert_eq!(s.saved(), &[Card(2)]);
        assert_eq!(s.top(), Some(&Card(4)));
    }

    #[test]
    fn short_drag_keeps_card() {
        let mut s = session(2);
        assert_eq!(swipe(&mut s, 120.0, 0.0), None);
        assert_eq!(s.deck().pending_len(), 2);
        settle(&mut s);
        assert!(s.press());
    }

    #[test]
    fn unassigned_up_springs_back() {
        let mut s = session(2);
        assert_eq!(swipe(&mut s, 0.0, -300.0), None);
        assert_eq!(s.top(), Some(&Card(1)));
    }

    #[test]
    fn tap_opens() {
        let mut s = session(2);
        assert_eq!(s.tap(), Some(SessionEvent::Opened(Card(1))));
        assert!(s.layers().iter().all(|l| !l.departing));
    }

    #[test]
    fn tap_ignored_mid_drag() {
        let mut s = session(2);
        s.press();
        s.drag(40.0, 0.0);
        assert_eq!(s.tap(), None);
    }

    #[test]
    fn drag_hint_follows_finger() {
        let mut s = session(2);
        s.press();
        s.drag(0.0, 150.0);
        assert_eq!(s.drag_hint(), Some(SwipeAction::Save));
        s.drag(10.0, 10.0);
        assert_eq!(s.drag_hint(), None);
    }

    #[test]
    fn buttons_trigger_actions() {
        let mut s = session(3);
        assert_eq!(s.trigger(SwipeAction::Save), Some(SessionEvent::Saved(Card(1))));
        assert_eq!(s.trigger(SwipeAction::Unassigned), None);
        let departing: Vec<_> = s.layers().into_iter().filter(|l| l.departing).collect();
        assert_eq!(departing.len(), 1);
        assert_eq!(departing[0].item_id, 1);
    }

    #[test]
    fn revert_restores_top_and_unsaves() {
        let mut s = session(3);
        swipe(&mut s, 0.0, 300.0);
        assert_eq!(s.saved().len(), 1);
        assert_eq!(s.revert(), Some(&Card(1)));
        assert!(s.saved().is_empty());
        assert_eq!(s.deck().history_len(), 0);
        let top = s.layers().into_iter().last().unwrap();
        assert_eq!(top.item_id, 1);
        assert!(top.enabled);
        assert!(s.press());
    }

    #[test]
    fn layers_stack_back_to_front() {
        let mut s = session(5);
        let layers = s.layers();
        let ids: Vec<u64> = layers.iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(layers[2].enabled && !layers[1].enabled && !layers[0].enabled);
        assert_eq!(layers[0].transform.scale, 0.95);

        swipe(&mut s, -300.0, 0.0);
        let ids: Vec<u64> = s.layers().iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);

        settle(&mut s);
        let layers = s.layers();
        let ids: Vec<u64> = layers.iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
        assert_eq!(layers[2].transform.scale, 1.0);
        assert_eq!(layers[2].transform.opacity, 1.0);
    }

    #[test]
    fn progress_and_refill() {
        let mut s = session(2);
        swipe(&mut s, -300.0, 0.0);
        assert_eq!(s.progress(), 0.5);
        s.refill(vec![Card(9)]);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.layers().len(), 1);
        assert!(s.revert().is_none());
    }

    #[test]
    fn empty_deck_ignores_everything() {
        let mut s = session(0);
        assert!(!s.press());
        assert_eq!(s.release(), None);
        assert_eq!(s.tap(), None);
        assert_eq!(s.trigger(SwipeAction::Dismiss), None);
        assert!(s.layers().is_empty());
    }

    #[test]
    fn tutorial_advances_on_expected_actions() {
        let mut s = session(4);
        s.start_tutorial();
        assert!(s.tutorial_next());
        swipe(&mut s, -300.0, 0.0);
        s.revert();
        swipe(&mut s, 0.0, 300.0);
        swipe(&mut s, 300.0, 0.0);
        assert!(!s.tutorial().is_active());
    }

    #[test]
    fn save_on_right_policy() {
        let config = SamwichConfig {
            policy: SwipePolicy::preset(PolicyPreset::SaveOnRight),
            ..Default::default()
        };
        let mut s = DiscoverSession::new((1..=3).map(Card), Viewport::new(400.0, 800.0), &config);
        assert_eq!(swipe(&mut s, 300.0, 0.0), Some(SessionEvent::Saved(Card(1))));
        assert_eq!(swipe(&mut s, 0.0, -300.0), Some(SessionEvent::Opened(Card(2))));
        assert_eq!(swipe(&mut s, 0.0, 300.0), None);
    }

    #[test]
    fn zero_window_can_still_decide() {
        let config = SamwichConfig {
            deck_window: 0,
            ..Default::default()
        };
        let mut s = DiscoverSession::new((1..=3).map(Card), Viewport::new(400.0, 800.0), &config);
        assert_eq!(swipe(&mut s, -200.0, 0.0), Some(SessionEvent::Dismissed(Card(1))));
        assert_eq!(s.trigger(SwipeAction::Save), Some(SessionEvent::Saved(Card(2))));
        assert_eq!(s.tap(), Some(SessionEvent::Opened(Card(3))));
        assert!(!s.press());
    }

    #[test]
    fn saving_a_refilled_card_keeps_one_entry() {
        let mut s = session(2);
        assert_eq!(swipe(&mut s, 0.0, 200.0), Some(SessionEvent::Saved(Card(1))));
        s.refill((1..=2).map(Card));
        assert_eq!(swipe(&mut s, 0.0, 200.0), Some(SessionEvent::Saved(Card(1))));
        assert_eq!(s.saved(), [Card(1)].as_slice());
    }
}
