use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deck::DEFAULT_WINDOW;
use crate::gesture::{CardStyle, SpringConfig, SwipePolicy};
use crate::nutrition::DailyGoals;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("deck_window must be at least 1")]
    EmptyDeckWindow,
}

/// User-tunable settings. Every field has a default, so an empty object
/// (or no file at all) is a valid configuration.
///
/// The swipe threshold, fling distance and rotation factor are constants
/// in [`crate::gesture::swipe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamwichConfig {
    pub policy: SwipePolicy,
    /// Number of cards rendered on the stack.
    pub deck_window: usize,
    pub spring: SpringConfig,
    pub card_style: CardStyle,
    pub daily_goals: DailyGoals,
}

impl Default for SamwichConfig {
    fn default() -> Self {
        Self {
            policy: SwipePolicy::default(),
            deck_window: DEFAULT_WINDOW,
            spring: SpringConfig::default(),
            card_style: CardStyle::default(),
            daily_goals: DailyGoals::default(),
        }
    }
}

impl SamwichConfig {
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_window == 0 {
            return Err(ConfigError::EmptyDeckWindow);
        }
        Ok(())
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read(path) {
            Ok(data) => Self::from_json(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
