pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

pub use engine::{StreakSummary, summarize};
pub use error::{ConfigError, LadderError};
pub use models::{DayValidationResponse, FlameLevel, LevelLadder, NextLevel};
