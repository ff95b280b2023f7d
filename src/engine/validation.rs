use crate::models::{DayActivity, ValidationCriteria, ValidationResult};

/// Completion percentage rounded half-up; 0 for an empty day.
///
/// Never exceeds 100, even if `completed_items` is larger than `total_items`.
pub fn overall_rate(completed_items: u32, total_items: u32) -> u32 {
    if total_items == 0 {
        return 0;
    }
    let completed = u64::from(completed_items);
    let total = u64::from(total_items);
    let rate = ((completed * 200 + total) / (total * 2)).min(100);
    rate as u32
}

/// Checks one day against the streak thresholds.
///
/// Each requirement is reported on its own so callers can show a checklist.
/// The focus-session requirement only takes part when
/// `criteria.required_focus_sessions` is set; a missing session count then
/// counts as zero.
pub fn evaluate(activity: &DayActivity, criteria: &ValidationCriteria) -> ValidationResult {
    let overall_rate = overall_rate(activity.completed_items, activity.total_items);
    let meets_completion_rate = overall_rate >= criteria.required_completion_rate;
    let meets_min_tasks = activity.completed_qualifying >= criteria.required_min_tasks;
    let meets_focus_sessions = criteria
        .required_focus_sessions
        .map(|required| activity.focus_sessions.unwrap_or(0) >= required);

    ValidationResult {
        overall_rate,
        meets_completion_rate,
        meets_min_tasks,
        meets_focus_sessions,
        is_valid: meets_completion_rate && meets_min_tasks && meets_focus_sessions.unwrap_or(true),
    }
}
