//! Maps a streak onto the ordered flame-level ladder.
//!
//! The functions take plain slices so callers holding unvalidated data can use
//! them too; on a [`LevelLadder`](crate::models::LevelLadder) the result is
//! always well defined.

use log::trace;

use crate::models::{FlameLevel, LevelStatus, NextLevel};

/// Highest level whose threshold the streak has reached.
///
/// Ties on `days_required` go to the higher `level`. Returns `None` only when
/// every level needs more days than `streak`.
pub fn resolve_current_level(streak: u32, levels: &[FlameLevel]) -> Option<&FlameLevel> {
    let current = levels
        .iter()
        .filter(|l| l.is_unlocked_at(streak))
        .max_by_key(|l| l.level);
    trace!(
        "streak {} resolves to level {:?}",
        streak,
        current.map(|l| l.level)
    );
    current
}

/// The level directly above `current`, or [`NextLevel::MaxLevel`].
///
/// Without a current level the lowest level of the ladder is the next target.
pub fn resolve_next_level<'a>(
    current: Option<&FlameLevel>,
    levels: &'a [FlameLevel],
) -> NextLevel<'a> {
    let next = match current {
        Some(current) => current
            .level
            .checked_add(1)
            .and_then(|n| levels.iter().find(|l| l.level == n)),
        None => levels.iter().min_by_key(|l| l.level),
    };
    match next {
        Some(level) => NextLevel::Tier(level),
        None => NextLevel::MaxLevel,
    }
}

/// Unlocked/current flags for every level, in ladder order.
pub fn level_statuses(streak: u32, levels: &[FlameLevel]) -> Vec<LevelStatus<'_>> {
    let current = resolve_current_level(streak, levels).map(|l| l.level);
    levels
        .iter()
        .map(|level| LevelStatus {
            level,
            is_unlocked: level.is_unlocked_at(streak),
            is_current: Some(level.level) == current,
        })
        .collect()
}
