pub mod adjust;
pub mod discover;

pub use adjust::AdjustSession;
pub use discover::{DiscoverSession, SessionEvent};
