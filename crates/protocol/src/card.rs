use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Visual state of a single card at one instant.
///
/// Hosts apply this in order: translate, rotate about the card center,
/// scale, then multiply alpha by `opacity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardTransform {
    pub translate: Point,
    /// Degrees, clockwise positive.
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl CardTransform {
    pub const IDENTITY: Self = Self {
        translate: Point::ORIGIN,
        rotation_deg: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One entry of the layered card stack handed to a renderer.
///
/// Layers are emitted back-to-front; `z_index` is provided for hosts that
/// sort on their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardLayer {
    pub item_id: u64,
    pub transform: CardTransform,
    pub z_index: u32,
    /// Whether the host should route gestures to this card.
    pub enabled: bool,
    /// Card has been decided and is flying off-screen.
    pub departing: bool,
}
