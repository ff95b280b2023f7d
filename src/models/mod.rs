pub mod level;
pub mod stats;
pub mod validation;

pub use level::{FlameLevel, LevelLadder, LevelStatus, NextLevel, default_levels};
pub use stats::{DailyStats, Streak};
pub use validation::{DayActivity, DayValidationResponse, ValidationCriteria, ValidationResult};
