//! Streak and validation engine.
//!
//! Pure functions over already-fetched data: no I/O, no shared state. Callers
//! supply the streak, the level ladder and the day snapshot on every call.

pub mod levels;
pub mod progress;
pub mod summary;
pub mod validation;

pub use levels::{level_statuses, resolve_current_level, resolve_next_level};
pub use progress::{days_remaining, progress_to_next};
pub use summary::{StreakSummary, summarize};
pub use validation::{evaluate, overall_rate};
