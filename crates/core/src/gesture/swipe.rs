use samwich_protocol::{CardTransform, Point, SwipeDirection, Viewport};
use serde::{Deserialize, Serialize};

use super::policy::EnabledSwipes;
use super::spring::{Spring, SpringConfig};

/// Fraction of the viewport a drag must exceed to count as a swipe.
pub const SWIPE_THRESHOLD_FRACTION: f64 = 0.3;
/// Fling target as a multiple of the viewport dimension.
pub const FLING_FACTOR: f64 = 1.5;
/// Degrees of rotation per full viewport width of horizontal travel.
pub const ROTATION_FACTOR_DEG: f64 = 15.0;

/// Scale and opacity of cards that are not on top of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    pub inactive_scale: f64,
    pub inactive_opacity: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            inactive_scale: 0.95,
            inactive_opacity: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Resolving,
}

/// Drives one card's drag transform and turns a released drag into at most
/// one swipe decision.
///
/// ```text
///   Idle ──begin──▶ Dragging ──update──▶ Dragging
///                       │
///                      end ──▶ Resolving ──springs settle──▶ Idle
/// ```
///
/// Only the top card is enabled; disabled cards never enter `Dragging`.
/// A card that was flung stays `departed` and refuses further gestures.
#[derive(Debug, Clone)]
pub struct SwipeCardController {
    viewport: Viewport,
    swipes: EnabledSwipes,
    style: CardStyle,
    phase: GesturePhase,
    enabled: bool,
    departed: Option<SwipeDirection>,
    translate_x: Spring,
    translate_y: Spring,
    scale: Spring,
    opacity: Spring,
}

impl SwipeCardController {
    pub fn new(
        viewport: Viewport,
        swipes: EnabledSwipes,
        springs: SpringConfig,
        style: CardStyle,
        is_top: bool,
    ) -> Self {
        let (scale, opacity) = if is_top {
            (1.0, 1.0)
        } else {
            (style.inactive_scale, style.inactive_opacity)
        };
        Self {
            viewport,
            swipes,
            style,
            phase: GesturePhase::Idle,
            enabled: is_top,
            departed: None,
            translate_x: Spring::at_rest(0.0, springs),
            translate_y: Spring::at_rest(0.0, springs),
            scale: Spring::at_rest(scale, springs),
            opacity: Spring::at_rest(opacity, springs),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Direction the card was flung in, once decided.
    pub fn departed(&self) -> Option<SwipeDirection> {
        self.departed
    }

    pub fn threshold(&self) -> f64 {
        SWIPE_THRESHOLD_FRACTION * self.viewport.width
    }

    pub fn translation(&self) -> Point {
        Point::new(self.translate_x.value(), self.translate_y.value())
    }

    /// Derived from horizontal displacement; never set directly.
    pub fn rotation_deg(&self) -> f64 {
        if self.viewport.width <= 0.0 {
            return 0.0;
        }
        self.translate_x.value() / self.viewport.width * ROTATION_FACTOR_DEG
    }

    pub fn transform(&self) -> CardTransform {
        CardTransform {
            translate: self.translation(),
            rotation_deg: self.rotation_deg(),
            scale: self.scale.value(),
            opacity: self.opacity.value(),
        }
    }

    /// Promote or demote the card. Scale and opacity animate toward the
    /// matching style; a demoted card drops any drag in progress.
    pub fn set_top(&mut self, is_top: bool) {
        self.enabled = is_top && self.departed.is_none();
        if is_top {
            self.scale.animate_to(1.0);
            self.opacity.animate_to(1.0);
        } else {
            self.scale.animate_to(self.style.inactive_scale);
            self.opacity.animate_to(self.style.inactive_opacity);
            if self.phase == GesturePhase::Dragging {
                self.spring_back();
            }
        }
    }

    /// Start a drag. Offsets reset to zero; returns `false` if the card is
    /// not accepting gestures.
    pub fn begin(&mut self) -> bool {
        if !self.enabled || self.departed.is_some() || self.phase == GesturePhase::Dragging {
            return false;
        }
        self.translate_x.set(0.0);
        self.translate_y.set(0.0);
        self.phase = GesturePhase::Dragging;
        true
    }

    /// Apply the gesture's cumulative displacement since `begin`.
    pub fn update(&mut self, translation_x: f64, translation_y: f64) {
        if self.phase != GesturePhase::Dragging {
            return;
        }
        self.translate_x.set(translation_x);
        self.translate_y.set(translation_y);
    }

    /// Release the drag and dispatch on the final displacement.
    ///
    /// Priority: right, left, then the enabled vertical direction. The
    /// threshold comparison is strict, so a release exactly on it springs
    /// back.
    pub fn end(&mut self) -> Option<SwipeDirection> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        let direction = self.dispatch();
        match direction {
            Some(direction) => self.fling(direction),
            None => self.spring_back(),
        }
        direction
    }

    /// What releasing right now would decide. `None` outside a drag.
    pub fn pending_direction(&self) -> Option<SwipeDirection> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.dispatch()
    }

    fn dispatch(&self) -> Option<SwipeDirection> {
        let threshold = self.threshold();
        let x = self.translate_x.value();
        let y = self.translate_y.value();

        if self.swipes.right && x > threshold {
            Some(SwipeDirection::Right)
        } else if self.swipes.left && x < -threshold {
            Some(SwipeDirection::Left)
        } else if self.swipes.down && y > threshold {
            Some(SwipeDirection::Down)
        } else if self.swipes.up && y < -threshold {
            Some(SwipeDirection::Up)
        } else {
            None
        }
    }

    /// A press without displacement. Independent of the drag state machine.
    pub fn tap(&self) -> Option<SwipeDirection> {
        (self.enabled && self.departed.is_none() && self.phase != GesturePhase::Dragging)
            .then_some(SwipeDirection::Tap)
    }

    /// Send the card off-screen in `direction` and disable it for good.
    /// `Tap` has no off-screen target; the card departs in place.
    pub fn fling(&mut self, direction: SwipeDirection) {
        let dx = FLING_FACTOR * self.viewport.width;
        let dy = FLING_FACTOR * self.viewport.height;
        match direction {
            SwipeDirection::Right => self.translate_x.animate_to(dx),
            SwipeDirection::Left => self.translate_x.animate_to(-dx),
            SwipeDirection::Down => self.translate_y.animate_to(dy),
            SwipeDirection::Up => self.translate_y.animate_to(-dy),
            SwipeDirection::Tap => {}
        }
        self.departed = Some(direction);
        self.enabled = false;
        self.phase = GesturePhase::Resolving;
    }

    fn spring_back(&mut self) {
        self.translate_x.animate_to(0.0);
        self.translate_y.animate_to(0.0);
        self.phase = GesturePhase::Resolving;
    }

    /// Advance all animations by `dt` seconds. Returns `true` while any
    /// spring is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.phase == GesturePhase::Dragging {
            // Offsets follow the finger; only the style springs animate.
            let scale = self.scale.step(dt);
            let opacity = self.opacity.step(dt);
            return scale | opacity;
        }
        let moving = self.translate_x.step(dt)
            | self.translate_y.step(dt)
            | self.scale.step(dt)
            | self.opacity.step(dt);
        if !moving && self.phase == GesturePhase::Resolving {
            self.phase = GesturePhase::Idle;
        }
        moving
    }
}
