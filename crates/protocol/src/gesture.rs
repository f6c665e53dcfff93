use serde::{Deserialize, Serialize};

/// The physical input that concluded a card interaction.
///
/// `Tap` is a separate input channel (a press without displacement), not a
/// degenerate drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
    Tap,
}

impl SwipeDirection {
    pub const ALL: [Self; 5] = [Self::Left, Self::Right, Self::Up, Self::Down, Self::Tap];
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Tap => write!(f, "tap"),
        }
    }
}

/// What a resolved direction means to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Dismiss,
    Save,
    Open,
    #[default]
    Unassigned,
}

impl SwipeAction {
    pub fn is_assigned(self) -> bool {
        self != Self::Unassigned
    }
}

impl std::fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dismiss => write!(f, "dismiss"),
            Self::Save => write!(f, "save"),
            Self::Open => write!(f, "open"),
            Self::Unassigned => write!(f, "unassigned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_serialize_lowercase() {
        let json = serde_json::to_string(&SwipeDirection::Down).unwrap();
        assert_eq!(json, "\"down\"");
        let action: SwipeAction = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(action, SwipeAction::Open);
    }

    #[test]
    fn unassigned_is_default() {
        assert_eq!(SwipeAction::default(), SwipeAction::Unassigned);
        assert!(!SwipeAction::Unassigned.is_assigned());
        assert!(SwipeAction::Save.is_assigned());
    }
}
