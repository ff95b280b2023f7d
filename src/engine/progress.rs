use crate::models::{FlameLevel, NextLevel};

/// Fraction of the way from the current threshold to the next one, in `[0, 1]`.
///
/// At max level, or when the next threshold is not above the current one,
/// the result is `1.0`.
pub fn progress_to_next(streak: u32, current: Option<&FlameLevel>, next: NextLevel<'_>) -> f64 {
    let next = match next {
        NextLevel::Tier(next) => next,
        NextLevel::MaxLevel => return 1.0,
    };
    let floor = current.map_or(0, |c| c.days_required);
    if next.days_required <= floor {
        return 1.0;
    }

    let span = (next.days_required - floor) as f64;
    let covered = streak as f64 - floor as f64;
    (covered / span).clamp(0.0, 1.0)
}

/// Days still needed to reach the next level; 0 at max level.
pub fn days_remaining(streak: u32, next: NextLevel<'_>) -> u32 {
    match next {
        NextLevel::Tier(next) => next.days_required.saturating_sub(streak),
        NextLevel::MaxLevel => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: u32, days: u32) -> FlameLevel {
        FlameLevel::new(level, "L", "*", days)
    }

    #[test]
    fn partial_progress() {
        let (current, next) = (level(3, 30), level(4, 60));
        let p = progress_to_next(42, Some(&current), NextLevel::Tier(&next));
        assert!((p - 0.4).abs() < 1e-9);
        assert_eq!(days_remaining(42, NextLevel::Tier(&next)), 18);
    }

    #[test]
    fn max_level_is_fully_progressed() {
        let current = level(5, 100);
        assert_eq!(progress_to_next(150, Some(&current), NextLevel::MaxLevel), 1.0);
        assert_eq!(days_remaining(150, NextLevel::MaxLevel), 0);
    }

    #[test]
    fn flat_thresholds_do_not_divide_by_zero() {
        let (current, next) = (level(2, 10), level(3, 10));
        assert_eq!(progress_to_next(10, Some(&current), NextLevel::Tier(&next)), 1.0);

        let lower = level(3, 5);
        assert_eq!(progress_to_next(10, Some(&current), NextLevel::Tier(&lower)), 1.0);
    }

    #[test]
    fn stale_streak_is_clamped() {
        let (current, next) = (level(1, 0), level(2, 7));
        // Streak already past the next threshold.
        assert_eq!(progress_to_next(9, Some(&current), NextLevel::Tier(&next)), 1.0);
        assert_eq!(days_remaining(9, NextLevel::Tier(&next)), 0);

        // Streak below the current threshold.
        let (current, next) = (level(2, 7), level(3, 30));
        assert_eq!(progress_to_next(2, Some(&current), NextLevel::Tier(&next)), 0.0);
    }

    #[test]
    fn missing_current_counts_from_zero() {
        let next = level(1, 4);
        let p = progress_to_next(1, None, NextLevel::Tier(&next));
        assert!((p - 0.25).abs() < 1e-9);
    }
}
