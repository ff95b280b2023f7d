use thiserror::Error;

/// Problems found while validating a flame-level ladder at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    #[error("level ladder is empty")]
    Empty,

    #[error("first level ({level}) must require 0 days, found {days_required}")]
    MissingBaseLevel { level: u32, days_required: u32 },

    #[error("level numbers must start at 1 or above, found {0}")]
    NonPositiveLevel(u32),

    #[error("level {found} follows level {previous}; levels must increase by exactly 1")]
    LevelGap { previous: u32, found: u32 },

    #[error("level {level} requires {days_required} days, less than the {previous_days} before it")]
    DecreasingThreshold {
        level: u32,
        days_required: u32,
        previous_days: u32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid level configuration: {0}")]
    Ladder(#[from] LadderError),

    #[error("required completion rate must be between 0 and 100, found {0}")]
    CompletionRateOutOfRange(u32),
}
