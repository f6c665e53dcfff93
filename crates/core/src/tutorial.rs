use samwich_protocol::SwipeAction;
use serde::{Deserialize, Serialize};

/// Steps of the swipe walkthrough, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialStep {
    Intro,
    Dismiss,
    Revert,
    Save,
    Open,
}

impl TutorialStep {
    fn next(self) -> Option<Self> {
        match self {
            Self::Intro => Some(Self::Dismiss),
            Self::Dismiss => Some(Self::Revert),
            Self::Revert => Some(Self::Save),
            Self::Save => Some(Self::Open),
            Self::Open => None,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Intro => "Swipe through recipes picked from your pantry.",
            Self::Dismiss => "Swipe left to skip a recipe.",
            Self::Revert => "Changed your mind? Undo brings it back.",
            Self::Save => "Save a recipe for later.",
            Self::Open => "Open a recipe to start cooking.",
        }
    }
}

/// Something the user did while the walkthrough is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialInput {
    Next,
    Action(SwipeAction),
    Revert,
}

/// Five-step walkthrough that advances only when the user performs the
/// action the current step asks for.
#[derive(Debug, Clone, Default)]
pub struct SwipeTutorial {
    step: Option<TutorialStep>,
}

impl SwipeTutorial {
    pub fn start(&mut self) {
        self.step = Some(TutorialStep::Intro);
    }

    pub fn close(&mut self) {
        self.step = None;
    }

    pub fn step(&self) -> Option<TutorialStep> {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.step.is_some()
    }

    /// Returns `true` if the input completed the current step.
    pub fn observe(&mut self, input: TutorialInput) -> bool {
        let Some(step) = self.step else {
            return false;
        };
        let expected = match step {
            TutorialStep::Intro => TutorialInput::Next,
            TutorialStep::Dismiss => TutorialInput::Action(SwipeAction::Dismiss),
            TutorialStep::Revert => TutorialInput::Revert,
            TutorialStep::Save => TutorialInput::Action(SwipeAction::Save),
            TutorialStep::Open => TutorialInput::Action(SwipeAction::Open),
        };
        if input != expected {
            return false;
        }
        self.step = step.next();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_through_every_step() {
        let mut t = SwipeTutorial::default();
        t.start();
        assert!(t.observe(TutorialInput::Next));
        assert_eq!(t.step(), Some(TutorialStep::Dismiss));
        assert!(t.observe(TutorialInput::Action(SwipeAction::Dismiss)));
        assert!(t.observe(TutorialInput::Revert));
        assert!(t.observe(TutorialInput::Action(SwipeAction::Save)));
        assert_eq!(t.step(), Some(TutorialStep::Open));
        assert!(t.observe(TutorialInput::Action(SwipeAction::Open)));
        assert!(!t.is_active());
    }

    #[test]
    fn wrong_action_does_not_advance() {
        let mut t = SwipeTutorial::default();
        t.start();
        t.observe(TutorialInput::Next);
        assert!(!t.observe(TutorialInput::Action(SwipeAction::Open)));
        assert!(!t.observe(TutorialInput::Revert));
        assert_eq!(t.step(), Some(TutorialStep::Dismiss));
    }

    #[test]
    fn inactive_ignores_input() {
        let mut t = SwipeTutorial::default();
        assert!(!t.observe(TutorialInput::Next));
        assert_eq!(t.step(), None);
    }
}
