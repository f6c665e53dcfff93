use std::collections::{HashSet, VecDeque};

use samwich_protocol::SwipeDirection;
use tracing::{debug, warn};

/// Default number of cards rendered on the stack at once.
pub const DEFAULT_WINDOW: usize = 3;

/// Anything that can sit on the card stack. The deck only ever looks at
/// the identity.
pub trait CardItem {
    fn card_id(&self) -> u64;
}

/// A card taken off the front of the pending queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Decided<T> {
    pub item: T,
    pub direction: SwipeDirection,
}

/// Ordered queue of undecided cards plus an undo history.
///
/// `pending` and `history` never share an id. Deciding moves the front of
/// `pending` onto the front of `history`; reverting moves it back.
#[derive(Debug, Clone)]
pub struct CardDeck<T> {
    pending: VecDeque<T>,
    history: VecDeque<T>,
    total: usize,
    window: usize,
}

impl<T: CardItem + Clone> CardDeck<T> {
    /// `window` is clamped to at least one card.
    pub fn new(window: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            history: VecDeque::new(),
            total: 0,
            window: window.max(1),
        }
    }

    pub fn from_items(items: impl IntoIterator<Item = T>, window: usize) -> Self {
        let mut deck = Self::new(window);
        deck.refill(items);
        deck
    }

    /// Take the front card. Empty queue is a no-op.
    pub fn decide(&mut self, direction: SwipeDirection) -> Option<Decided<T>> {
        let item = self.pending.pop_front()?;
        debug!(
            card = item.card_id(),
            %direction,
            remaining = self.pending.len(),
            "card decided"
        );
        self.history.push_front(item.clone());
        Some(Decided { item, direction })
    }

    /// Put the most recently decided card back on top. Empty history is a
    /// no-op.
    pub fn revert(&mut self) -> Option<&T> {
        let item = self.history.pop_front()?;
        debug!(card = item.card_id(), "card reverted");
        self.pending.push_front(item);
        self.pending.front()
    }

    /// Replace the queue wholesale and forget the history.
    ///
    /// Duplicate ids after the first occurrence are dropped.
    pub fn refill(&mut self, items: impl IntoIterator<Item = T>) {
        let mut seen = HashSet::new();
        self.pending.clear();
        for item in items {
            if seen.insert(item.card_id()) {
                self.pending.push_back(item);
            } else {
                warn!(card = item.card_id(), "duplicate card id dropped on refill");
            }
        }
        self.history.clear();
        self.total = self.pending.len();
        debug!(total = self.total, "deck refilled");
    }

    /// Share of the last refill that has been decided, in `[0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let decided = self.total.saturating_sub(self.pending.len());
        (decided as f64 / self.total as f64).clamp(0.0, 1.0)
    }

    pub fn top(&self) -> Option<&T> {
        self.pending.front()
    }

    /// The rendered slice of the queue, topmost first.
    pub fn window(&self) -> impl Iterator<Item = &T> {
        self.pending.iter().take(self.window)
    }

    pub fn window_size(&self) -> usize {
        self.window
    }

    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.pending.iter()
    }

    /// Most recently decided first.
    pub fn history(&self) -> impl Iterator<Item = &T> {
        self.history.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn can_revert(&self) -> bool {
        !self.history.is_empty()
    }
}

impl<T: CardItem + Clone> Default for CardDeck<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Card(u64);

    impl CardItem for Card {
        fn card_id(&self) -> u64 {
            self.0
        }
    }

    fn ids<'a>(iter: impl Iterator<Item = &'a Card>) -> Vec<u64> {
        iter.map(|c| c.0).collect()
    }

    fn deck(n: u64) -> CardDeck<Card> {
        CardDeck::from_items((1..=n).map(Card), DEFAULT_WINDOW)
    }

    #[test]
    fn decide_moves_front_to_history() {
        let mut d = deck(4);
        let decided = d.decide(SwipeDirection::Left).unwrap();
        assert_eq!(decided.item, Card(1));
        assert_eq!(decided.direction, SwipeDirection::Left);
        d.decide(SwipeDirection::Right);
        assert_eq!(ids(d.pending()), vec![3, 4]);
        assert_eq!(ids(d.history()), vec![2, 1]);
    }

    #[test]
    fn revert_undoes_decide() {
        for n in 2..7 {
            let mut d = deck(n);
            d.decide(SwipeDirection::Down);
            let pending = ids(d.pending());
            let history = ids(d.history());

            d.decide(SwipeDirection::Right);
            d.revert();
            assert_eq!(ids(d.pending()), pending);
            assert_eq!(ids(d.history()), history);
        }
    }

    #[test]
    fn empty_operations_are_noops() {
        let mut d: CardDeck<Card> = CardDeck::default();
        assert!(d.decide(SwipeDirection::Left).is_none());
        assert!(d.revert().is_none());
        assert_eq!(d.pending_len(), 0);
        assert_eq!(d.history_len(), 0);

        let mut d = deck(2);
        assert!(d.revert().is_none());
        assert_eq!(ids(d.pending()), vec![1, 2]);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut d = deck(4);
        assert_eq!(d.progress_fraction(), 0.0);
        d.decide(SwipeDirection::Left);
        assert_eq!(d.progress_fraction(), 0.25);
        while d.decide(SwipeDirection::Left).is_some() {}
        assert_eq!(d.progress_fraction(), 1.0);
        d.revert();
        assert_eq!(d.progress_fraction(), 0.75);
    }

    #[test]
    fn refill_resets_everything() {
        let mut d = deck(3);
        d.decide(SwipeDirection::Left);
        d.refill(vec![Card(7), Card(8)]);
        assert_eq!(ids(d.pending()), vec![7, 8]);
        assert_eq!(d.history_len(), 0);
        assert_eq!(d.total(), 2);
        assert_eq!(d.progress_fraction(), 0.0);
        assert!(!d.can_revert());
    }

    #[test]
    fn refill_drops_duplicate_ids() {
        let d = CardDeck::from_items(vec![Card(1), Card(2), Card(1)], 3);
        assert_eq!(ids(d.pending()), vec![1, 2]);
        assert_eq!(d.total(), 2);
    }

    #[test]
    fn window_shows_first_three() {
        let mut d = deck(5);
        assert_eq!(ids(d.window()), vec![1, 2, 3]);
        d.decide(SwipeDirection::Left);
        d.decide(SwipeDirection::Left);
        d.decide(SwipeDirection::Left);
        assert_eq!(ids(d.window()), vec![4, 5]);
    }

    #[test]
    fn zero_window_still_shows_top_card() {
        let d = CardDeck::from_items(vec![Card(1), Card(2)], 0);
        assert_eq!(d.window_size(), 1);
        assert_eq!(ids(d.window()), vec![1]);
    }

    #[test]
    fn ids_stay_disjoint() {
        let mut d = deck(5);
        d.decide(SwipeDirection::Left);
        d.decide(SwipeDirection::Right);
        d.revert();
        d.decide(SwipeDirection::Down);
        let pending: HashSet<u64> = ids(d.pending()).into_iter().collect();
        let history: HashSet<u64> = ids(d.history()).into_iter().collect();
        assert!(pending.is_disjoint(&history));
        assert_eq!(pending.len() + history.len(), 5);
    }
}
