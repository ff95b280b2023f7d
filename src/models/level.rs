use serde::{Deserialize, Serialize};

use crate::error::LadderError;

/// A named tier unlocked once the streak reaches `days_required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameLevel {
    pub level: u32,
    pub name: String,
    pub icon: String,
    pub days_required: u32,
}

impl FlameLevel {
    pub fn new(level: u32, name: &str, icon: &str, days_required: u32) -> Self {
        Self {
            level,
            name: name.to_string(),
            icon: icon.to_string(),
            days_required,
        }
    }

    pub fn is_unlocked_at(&self, streak: u32) -> bool {
        self.days_required <= streak
    }
}

/// The level after the current one, or the explicit end of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLevel<'a> {
    Tier(&'a FlameLevel),
    MaxLevel,
}

impl<'a> NextLevel<'a> {
    pub fn tier(&self) -> Option<&'a FlameLevel> {
        match *self {
            NextLevel::Tier(level) => Some(level),
            NextLevel::MaxLevel => None,
        }
    }

    pub fn is_max(&self) -> bool {
        matches!(self, NextLevel::MaxLevel)
    }
}

/// Derived per-level flags for a given streak. Never stored on `FlameLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStatus<'a> {
    pub level: &'a FlameLevel,
    pub is_unlocked: bool,
    pub is_current: bool,
}

/// An ordered, validated sequence of flame levels.
///
/// Construction checks that the ladder is non-empty, starts at a 0-day base
/// level, numbers its levels contiguously and never lowers a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelLadder {
    levels: Vec<FlameLevel>,
}

impl LevelLadder {
    pub fn new(levels: Vec<FlameLevel>) -> Result<Self, LadderError> {
        let first = levels.first().ok_or(LadderError::Empty)?;
        if first.level == 0 {
            return Err(LadderError::NonPositiveLevel(first.level));
        }
        if first.days_required != 0 {
            return Err(LadderError::MissingBaseLevel {
                level: first.level,
                days_required: first.days_required,
            });
        }

        for pair in levels.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.level.checked_add(1) != Some(next.level) {
                return Err(LadderError::LevelGap {
                    previous: prev.level,
                    found: next.level,
                });
            }
            if next.days_required < prev.days_required {
                return Err(LadderError::DecreasingThreshold {
                    level: next.level,
                    days_required: next.days_required,
                    previous_days: prev.days_required,
                });
            }
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[FlameLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelLadder {
    fn default() -> Self {
        Self {
            levels: default_levels(),
        }
    }
}

/// Spark, Ember, Flame, Blaze, Inferno at 0 / 7 / 30 / 60 / 100 days.
pub fn default_levels() -> Vec<FlameLevel> {
    vec![
        FlameLevel::new(1, "Spark", "✦", 0),
        FlameLevel::new(2, "Ember", "❂", 7),
        FlameLevel::new(3, "Flame", "🔥", 30),
        FlameLevel::new(4, "Blaze", "☀", 60),
        FlameLevel::new(5, "Inferno", "✹", 100),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder_is_valid() {
        assert!(LevelLadder::new(default_levels()).is_ok());
        assert_eq!(LevelLadder::default().len(), 5);
    }

    #[test]
    fn rejects_empty_ladder() {
        assert_eq!(LevelLadder::new(vec![]), Err(LadderError::Empty));
    }

    #[test]
    fn rejects_ladder_without_zero_day_base() {
        let err = LevelLadder::new(vec![FlameLevel::new(1, "Spark", "*", 3)]).unwrap_err();
        assert_eq!(
            err,
            LadderError::MissingBaseLevel {
                level: 1,
                days_required: 3
            }
        );
    }

    #[test]
    fn rejects_unsorted_and_duplicate_levels() {
        let unsorted = vec![
            FlameLevel::new(1, "Spark", "*", 0),
            FlameLevel::new(3, "Flame", "*", 30),
            FlameLevel::new(2, "Ember", "*", 7),
        ];
        assert_eq!(
            LevelLadder::new(unsorted),
            Err(LadderError::LevelGap {
                previous: 1,
                found: 3
            })
        );

        let duplicate = vec![
            FlameLevel::new(1, "Spark", "*", 0),
            FlameLevel::new(1, "Spark again", "*", 7),
        ];
        assert!(matches!(
            LevelLadder::new(duplicate),
            Err(LadderError::LevelGap { .. })
        ));
    }

    #[test]
    fn rejects_decreasing_thresholds_but_allows_equal_ones() {
        let decreasing = vec![
            FlameLevel::new(1, "Spark", "*", 0),
            FlameLevel::new(2, "Ember", "*", 10),
            FlameLevel::new(3, "Flame", "*", 5),
        ];
        assert!(matches!(
            LevelLadder::new(decreasing),
            Err(LadderError::DecreasingThreshold { level: 3, .. })
        ));

        let flat = vec![
            FlameLevel::new(1, "Spark", "*", 0),
            FlameLevel::new(2, "Ember", "*", 0),
        ];
        assert!(LevelLadder::new(flat).is_ok());
    }

    #[test]
    fn rejects_level_zero() {
        let ladder = vec![FlameLevel::new(0, "Nothing", "*", 0)];
        assert_eq!(
            LevelLadder::new(ladder),
            Err(LadderError::NonPositiveLevel(0))
        );
    }
}
