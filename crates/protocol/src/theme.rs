use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,

    // Cards
    CardSurface,
    CardBorder,
    CardTitle,
    CardInactive,

    // Decision hints shown while dragging
    DecisionDismiss,
    DecisionSave,
    DecisionOpen,

    // Inventory expiry tags
    ExpiryFresh,
    ExpirySoon,
    ExpiryExpired,

    // Progress and macro bars
    ProgressFill,
    ProgressTrack,
    CarbsBar,
    ProteinBar,
    FatBar,
    FiberBar,
}
