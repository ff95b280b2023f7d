use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::engine::evaluate;
use crate::models::{DailyStats, DayActivity, Streak, ValidationCriteria};

const DATE_FMT: &str = "%Y-%m-%d";

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

fn activity_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<DayActivity> {
    Ok(DayActivity {
        total_items: row.get(offset)?,
        completed_items: row.get(offset + 1)?,
        completed_qualifying: row.get(offset + 2)?,
        focus_sessions: row.get(offset + 3)?,
    })
}

// ─── Day log ─────────────────────────────────────────────────────────────────

pub struct DayLogRepo;

impl DayLogRepo {
    /// Inserts or replaces the counts recorded for `date`.
    pub fn upsert(conn: &Connection, date: NaiveDate, activity: &DayActivity) -> Result<()> {
        conn.execute(
            "INSERT INTO day_log
                (date, total_items, completed_items, qualifying_completed, focus_sessions)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                total_items = ?2,
                completed_items = ?3,
                qualifying_completed = ?4,
                focus_sessions = ?5,
                updated_at = datetime('now')",
            params![
                date_key(date),
                activity.total_items,
                activity.completed_items,
                activity.completed_qualifying,
                activity.focus_sessions,
            ],
        )
        .with_context(|| format!("Logging activity for {}", date))?;
        debug!("Logged {:?} for {}", activity, date);
        Ok(())
    }

    pub fn get(conn: &Connection, date: NaiveDate) -> Result<Option<DayActivity>> {
        conn.query_row(
            "SELECT total_items, completed_items, qualifying_completed, focus_sessions
             FROM day_log WHERE date = ?1",
            params![date_key(date)],
            |row| activity_from_row(row, 0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// All logged days in `[start, end]`, oldest first.
    pub fn get_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, DayActivity)>> {
        let mut stmt = conn.prepare(
            "SELECT date, total_items, completed_items, qualifying_completed, focus_sessions
             FROM day_log
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date",
        )?;
        collect_days(&mut stmt, params![date_key(start), date_key(end)])
    }

    pub fn get_all(conn: &Connection) -> Result<Vec<(NaiveDate, DayActivity)>> {
        let mut stmt = conn.prepare(
            "SELECT date, total_items, completed_items, qualifying_completed, focus_sessions
             FROM day_log
             ORDER BY date",
        )?;
        collect_days(&mut stmt, params![])
    }
}

fn collect_days<P: rusqlite::Params>(
    stmt: &mut rusqlite::Statement<'_>,
    params: P,
) -> Result<Vec<(NaiveDate, DayActivity)>> {
    let rows = stmt.query_map(params, |row| {
        Ok((row.get::<_, String>(0)?, activity_from_row(row, 1)?))
    })?;

    let mut days = Vec::new();
    for row in rows {
        let (date, activity) = row?;
        match NaiveDate::parse_from_str(&date, DATE_FMT) {
            Ok(d) => days.push((d, activity)),
            Err(e) => warn!("Skipping day_log row with bad date '{}': {}", date, e),
        }
    }
    Ok(days)
}

// ─── Stats repo ──────────────────────────────────────────────────────────────

pub struct StatsRepo;

impl StatsRepo {
    pub fn get_daily_stats_range(
        conn: &Connection,
        criteria: &ValidationCriteria,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStats>> {
        Ok(DayLogRepo::get_range(conn, start, end)?
            .into_iter()
            .map(|(date, activity)| DailyStats {
                date: date_key(date),
                completed_items: activity.completed_items,
                total_items: activity.total_items,
                result: evaluate(&activity, criteria),
            })
            .collect())
    }

    /// Current and best runs of consecutive valid days.
    ///
    /// A current streak that ended yesterday is still alive while today is
    /// unfinished.
    pub fn calculate_streak(
        conn: &Connection,
        criteria: &ValidationCriteria,
        today: NaiveDate,
    ) -> Result<Streak> {
        let valid_dates: Vec<NaiveDate> = DayLogRepo::get_all(conn)?
            .into_iter()
            .filter(|(date, activity)| *date <= today && evaluate(activity, criteria).is_valid)
            .map(|(date, _)| date)
            .collect();

        let streak = Streak {
            current: current_streak(&valid_dates, today),
            best: best_streak(&valid_dates),
        };
        debug!("Streak as of {}: {:?}", today, streak);
        Ok(streak)
    }
}

/// `dates` must be sorted ascending.
fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut expected = match dates.last() {
        Some(&last) if last == today => today,
        Some(&last) if Some(last) == today.pred_opt() => last,
        _ => return 0,
    };

    let mut current = 0u32;
    for &date in dates.iter().rev() {
        if date != expected {
            break;
        }
        current += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }
    current
}

/// `dates` must be sorted ascending.
fn best_streak(dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut best = 1u32;
    let mut current = 1u32;
    for pair in dates.windows(2) {
        if pair[0].succ_opt() == Some(pair[1]) {
            current += 1;
        } else {
            current = 1;
        }
        best = best.max(current);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FMT).unwrap()
    }

    fn criteria() -> ValidationCriteria {
        ValidationCriteria {
            required_completion_rate: 60,
            required_min_tasks: 1,
            required_focus_sessions: None,
        }
    }

    fn good_day() -> DayActivity {
        DayActivity {
            total_items: 5,
            completed_items: 4,
            completed_qualifying: 4,
            focus_sessions: None,
        }
    }

    fn bad_day() -> DayActivity {
        DayActivity {
            total_items: 5,
            completed_items: 1,
            completed_qualifying: 1,
            focus_sessions: None,
        }
    }

    #[test]
    fn upsert_replaces_previous_counts() {
        let conn = conn();
        let date = d("2026-10-01");
        DayLogRepo::upsert(&conn, date, &bad_day()).unwrap();
        DayLogRepo::upsert(&conn, date, &good_day()).unwrap();

        assert_eq!(DayLogRepo::get(&conn, date).unwrap(), Some(good_day()));
        assert_eq!(DayLogRepo::get_all(&conn).unwrap().len(), 1);
        assert_eq!(DayLogRepo::get(&conn, d("2026-10-02")).unwrap(), None);
    }

    #[test]
    fn focus_sessions_round_trip_as_null() {
        let conn = conn();
        let date = d("2026-10-01");
        let mut day = good_day();
        day.focus_sessions = Some(3);
        DayLogRepo::upsert(&conn, date, &day).unwrap();
        assert_eq!(DayLogRepo::get(&conn, date).unwrap().unwrap().focus_sessions, Some(3));

        DayLogRepo::upsert(&conn, date, &good_day()).unwrap();
        assert_eq!(DayLogRepo::get(&conn, date).unwrap().unwrap().focus_sessions, None);
    }

    #[test]
    fn streak_counts_consecutive_valid_days() {
        let conn = conn();
        for date in ["2026-10-10", "2026-10-11", "2026-10-12", "2026-10-14", "2026-10-15"] {
            DayLogRepo::upsert(&conn, d(date), &good_day()).unwrap();
        }
        DayLogRepo::upsert(&conn, d("2026-10-13"), &bad_day()).unwrap();

        let streak = StatsRepo::calculate_streak(&conn, &criteria(), d("2026-10-15")).unwrap();
        assert_eq!(streak, Streak { current: 2, best: 3 });
    }

    #[test]
    fn unfinished_today_keeps_yesterdays_streak() {
        let conn = conn();
        DayLogRepo::upsert(&conn, d("2026-10-16"), &good_day()).unwrap();
        DayLogRepo::upsert(&conn, d("2026-10-17"), &good_day()).unwrap();
        DayLogRepo::upsert(&conn, d("2026-10-18"), &bad_day()).unwrap();

        let streak = StatsRepo::calculate_streak(&conn, &criteria(), d("2026-10-18")).unwrap();
        assert_eq!(streak.current, 2);

        let later = StatsRepo::calculate_streak(&conn, &criteria(), d("2026-10-19")).unwrap();
        assert_eq!(later.current, 0);
        assert_eq!(later.best, 2);
    }

    #[test]
    fn empty_log_has_no_streak() {
        let conn = conn();
        let streak = StatsRepo::calculate_streak(&conn, &criteria(), d("2026-10-18")).unwrap();
        assert_eq!(streak, Streak::default());
    }

    #[test]
    fn future_days_are_ignored() {
        let conn = conn();
        DayLogRepo::upsert(&conn, d("2026-10-18"), &good_day()).unwrap();
        DayLogRepo::upsert(&conn, d("2026-10-20"), &good_day()).unwrap();
        let streak = StatsRepo::calculate_streak(&conn, &criteria(), d("2026-10-18")).unwrap();
        assert_eq!(streak, Streak { current: 1, best: 1 });
    }

    #[test]
    fn daily_stats_carry_evaluation() {
        let conn = conn();
        DayLogRepo::upsert(&conn, d("2026-10-01"), &good_day()).unwrap();
        DayLogRepo::upsert(&conn, d("2026-10-02"), &bad_day()).unwrap();

        let stats =
            StatsRepo::get_daily_stats_range(&conn, &criteria(), d("2026-10-01"), d("2026-10-07"))
                .unwrap();
        assert_eq!(stats.len(), 2);
        assert!(stats[0].result.is_valid);
        assert_eq!(stats[0].result.overall_rate, 80);
        assert!(!stats[1].result.is_valid);
    }
}
