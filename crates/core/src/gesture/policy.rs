use samwich_protocol::{SwipeAction, SwipeDirection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("up ({up}) and down ({down}) cannot both be assigned")]
    ConflictingVertical { up: SwipeAction, down: SwipeAction },
}

/// Which swipe directions a card controller should dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnabledSwipes {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl EnabledSwipes {
    pub fn horizontal() -> Self {
        Self {
            left: true,
            right: true,
            up: false,
            down: false,
        }
    }

    pub fn with_up(self) -> Self {
        Self {
            up: true,
            down: false,
            ..self
        }
    }

    pub fn with_down(self) -> Self {
        Self {
            up: false,
            down: true,
            ..self
        }
    }
}

/// Named direction layouts used by the recipe screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPreset {
    /// Right opens the recipe, down saves it.
    ViewOnRight,
    /// Right saves, up opens.
    SaveOnRight,
    /// Right and down both save.
    SaveRightAndDown,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct PolicyTable {
    left: SwipeAction,
    right: SwipeAction,
    up: SwipeAction,
    down: SwipeAction,
    tap: SwipeAction,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyRepr {
    Preset(PolicyPreset),
    Table(PolicyTable),
}

/// Maps every input direction to an application action.
///
/// Resolved once when a session is built. At most one vertical direction
/// may be assigned; the controller only dispatches that one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyRepr")]
pub struct SwipePolicy {
    left: SwipeAction,
    right: SwipeAction,
    up: SwipeAction,
    down: SwipeAction,
    tap: SwipeAction,
}

impl TryFrom<PolicyRepr> for SwipePolicy {
    type Error = PolicyError;

    fn try_from(repr: PolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            PolicyRepr::Preset(preset) => Ok(Self::preset(preset)),
            PolicyRepr::Table(t) => Self::new(t.left, t.right, t.up, t.down, t.tap),
        }
    }
}

impl SwipePolicy {
    pub fn new(
        left: SwipeAction,
        right: SwipeAction,
        up: SwipeAction,
        down: SwipeAction,
        tap: SwipeAction,
    ) -> Result<Self, PolicyError> {
        if up.is_assigned() && down.is_assigned() {
            return Err(PolicyError::ConflictingVertical { up, down });
        }
        Ok(Self {
            left,
            right,
            up,
            down,
            tap,
        })
    }

    pub fn preset(preset: PolicyPreset) -> Self {
        use SwipeAction::{Dismiss, Open, Save, Unassigned};
        let (right, up, down) = match preset {
            PolicyPreset::ViewOnRight => (Open, Unassigned, Save),
            PolicyPreset::SaveOnRight => (Save, Open, Unassigned),
            PolicyPreset::SaveRightAndDown => (Save, Unassigned, Save),
        };
        Self {
            left: Dismiss,
            right,
            up,
            down,
            tap: Open,
        }
    }

    pub fn resolve(&self, direction: SwipeDirection) -> SwipeAction {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Right => self.right,
            SwipeDirection::Up => self.up,
            SwipeDirection::Down => self.down,
            SwipeDirection::Tap => self.tap,
        }
    }

    /// First swipe (not tap) direction bound to `action`, in dispatch
    /// priority order.
    pub fn direction_for(&self, action: SwipeAction) -> Option<SwipeDirection> {
        [
            SwipeDirection::Right,
            SwipeDirection::Left,
            SwipeDirection::Down,
            SwipeDirection::Up,
        ]
        .into_iter()
        .find(|d| self.resolve(*d) == action)
    }

    pub fn enabled_swipes(&self) -> EnabledSwipes {
        EnabledSwipes {
            left: self.left.is_assigned(),
            right: self.right.is_assigned(),
            up: self.up.is_assigned(),
            down: self.down.is_assigned(),
        }
    }
}

impl Default for SwipePolicy {
    fn default() -> Self {
        Self::preset(PolicyPreset::ViewOnRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_on_right_layout() {
        let p = SwipePolicy::default();
        assert_eq!(p.resolve(SwipeDirection::Right), SwipeAction::Open);
        assert_eq!(p.resolve(SwipeDirection::Left), SwipeAction::Dismiss);
        assert_eq!(p.resolve(SwipeDirection::Down), SwipeAction::Save);
        assert_eq!(p.resolve(SwipeDirection::Up), SwipeAction::Unassigned);
        assert_eq!(p.resolve(SwipeDirection::Tap), SwipeAction::Open);
        assert_eq!(p.enabled_swipes(), EnabledSwipes::horizontal().with_down());
    }

    #[test]
    fn both_vertical_directions_conflict() {
        let err = SwipePolicy::new(
            SwipeAction::Dismiss,
            SwipeAction::Save,
            SwipeAction::Open,
            SwipeAction::Save,
            SwipeAction::Open,
        )
        .unwrap_err();
        assert!(matches!(err, PolicyError::ConflictingVertical { .. }));
    }

    #[test]
    fn deserializes_from_preset_name_or_table() {
        let p: SwipePolicy = serde_json::from_str("\"save_on_right\"").unwrap();
        assert_eq!(p, SwipePolicy::preset(PolicyPreset::SaveOnRight));
        assert_eq!(p.enabled_swipes(), EnabledSwipes::horizontal().with_up());

        let p: SwipePolicy =
            serde_json::from_str(r#"{"left":"dismiss","right":"save","tap":"open"}"#).unwrap();
        assert_eq!(p.resolve(SwipeDirection::Down), SwipeAction::Unassigned);
        assert!(!p.enabled_swipes().down);

        let bad = serde_json::from_str::<SwipePolicy>(r#"{"up":"open","down":"save"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn table_round_trips_through_json() {
        let p = SwipePolicy::preset(PolicyPreset::SaveRightAndDown);
        let json = serde_json::to_string(&p).unwrap();
        let back: SwipePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn direction_lookup_prefers_horizontal() {
        let p = SwipePolicy::preset(PolicyPreset::SaveRightAndDown);
        assert_eq!(p.direction_for(SwipeAction::Save), Some(SwipeDirection::Right));
        assert_eq!(p.direction_for(SwipeAction::Open), None);
    }
}
