pub mod policy;
pub mod spring;
pub mod swipe;

pub use policy::{EnabledSwipes, PolicyError, PolicyPreset, SwipePolicy};
pub use spring::{Spring, SpringConfig};
pub use swipe::{CardStyle, GesturePhase, SwipeCardController};
