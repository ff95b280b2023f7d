use log::debug;
use serde::Serialize;

use crate::engine::{
    days_remaining, evaluate, progress_to_next, resolve_current_level, resolve_next_level,
};
use crate::models::{DayValidationResponse, FlameLevel, LevelLadder};

/// Everything a dashboard needs for one day, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub streak: u32,
    pub current_level: Option<FlameLevel>,
    /// `None` once the last level is reached.
    pub next_level: Option<FlameLevel>,
    pub overall_rate: u32,
    pub meets_completion_rate: bool,
    pub meets_min_tasks: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_focus_sessions: Option<bool>,
    pub is_valid: bool,
    pub progress_to_next: f64,
    pub days_remaining: u32,
}

impl StreakSummary {
    pub fn is_max_level(&self) -> bool {
        self.next_level.is_none()
    }
}

pub fn summarize(streak: u32, ladder: &LevelLadder, day: &DayValidationResponse) -> StreakSummary {
    let levels = ladder.levels();
    let current = resolve_current_level(streak, levels);
    let next = resolve_next_level(current, levels);
    let result = evaluate(&day.activity(), &day.criteria());

    let summary = StreakSummary {
        streak,
        current_level: current.cloned(),
        next_level: next.tier().cloned(),
        overall_rate: result.overall_rate,
        meets_completion_rate: result.meets_completion_rate,
        meets_min_tasks: result.meets_min_tasks,
        meets_focus_sessions: result.meets_focus_sessions,
        is_valid: result.is_valid,
        progress_to_next: progress_to_next(streak, current, next),
        days_remaining: days_remaining(streak, next),
    };
    debug!(
        "summary: streak={} level={:?} valid={} rate={}%",
        streak,
        summary.current_level.as_ref().map(|l| l.level),
        summary.is_valid,
        summary.overall_rate
    );
    summary
}
