use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::repository::{DayLogRepo, StatsRepo};
use crate::models::{DayActivity, Streak, ValidationCriteria};

/// Source of the data the engine consumes.
///
/// Callers fetch through this and pass plain values into the engine; the
/// engine itself never holds a provider.
pub trait ActivityProvider {
    fn streak(&self, today: NaiveDate) -> Result<Streak>;
    fn day_activity(&self, date: NaiveDate) -> Result<Option<DayActivity>>;
}

/// Local day log kept in SQLite.
pub struct SqliteProvider<'c> {
    conn: &'c Connection,
    criteria: ValidationCriteria,
}

impl<'c> SqliteProvider<'c> {
    pub fn new(conn: &'c Connection, criteria: ValidationCriteria) -> Self {
        Self { conn, criteria }
    }

    pub fn criteria(&self) -> &ValidationCriteria {
        &self.criteria
    }
}

impl ActivityProvider for SqliteProvider<'_> {
    fn streak(&self, today: NaiveDate) -> Result<Streak> {
        StatsRepo::calculate_streak(self.conn, &self.criteria, today)
    }

    fn day_activity(&self, date: NaiveDate) -> Result<Option<DayActivity>> {
        DayLogRepo::get(self.conn, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn provider_reads_through_to_the_day_log() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let day = DayActivity {
            total_items: 3,
            completed_items: 3,
            completed_qualifying: 3,
            focus_sessions: Some(2),
        };
        DayLogRepo::upsert(&conn, today, &day).unwrap();

        let criteria = ValidationCriteria {
            required_completion_rate: 60,
            required_min_tasks: 1,
            required_focus_sessions: Some(2),
        };
        let provider = SqliteProvider::new(&conn, criteria);
        assert_eq!(provider.day_activity(today).unwrap(), Some(day));
        assert_eq!(provider.streak(today).unwrap().current, 1);
    }
}
