use anyhow::{Context, Result, bail};
use chrono::{Duration, Local, NaiveDate};
use log::info;
use rusqlite::Connection;
use std::io::{self, Read};

use kindle::config::AppConfig;
use kindle::db::repository::{DayLogRepo, StatsRepo};
use kindle::db::{ActivityProvider, SqliteProvider};
use kindle::engine::{StreakSummary, level_statuses, summarize};
use kindle::models::{DayActivity, DayValidationResponse, LevelLadder};
use kindle::utils::format::{check_mark, format_days, format_fraction, progress_bar};

use crate::cli::args::ConfigCommands;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const FLAME: &str = "\x1b[38;2;230;120;40m";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        None => Ok(today()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
    }
}

/// Rejects counts that cannot describe a real day.
fn check_counts(total: u32, completed: u32, qualifying: u32) -> Result<()> {
    if completed > total {
        bail!("Completed items ({}) cannot exceed total items ({})", completed, total);
    }
    if qualifying > completed {
        bail!(
            "Qualifying items ({}) cannot exceed completed items ({})",
            qualifying,
            completed
        );
    }
    Ok(())
}

// ─── Log ─────────────────────────────────────────────────────────────────────

pub fn handle_log(
    conn: &Connection,
    date: Option<&str>,
    total: u32,
    completed: u32,
    qualifying: Option<u32>,
    focus: Option<u32>,
) -> Result<()> {
    let qualifying = qualifying.unwrap_or(completed);
    check_counts(total, completed, qualifying)?;

    let date = parse_date(date)?;
    let activity = DayActivity {
        total_items: total,
        completed_items: completed,
        completed_qualifying: qualifying,
        focus_sessions: focus,
    };
    DayLogRepo::upsert(conn, date, &activity)?;
    info!("Recorded activity for {}", date);
    println_colored!(GREEN, "  ✓ Logged {}/{} items for {}", completed, total, date);
    Ok(())
}

// ─── Status ──────────────────────────────────────────────────────────────────

fn todays_summary(
    conn: &Connection,
    config: &AppConfig,
    ladder: &LevelLadder,
) -> Result<StreakSummary> {
    let provider = SqliteProvider::new(conn, config.validation.criteria());
    let today = today();
    let streak = provider.streak(today)?;
    let activity = provider.day_activity(today)?.unwrap_or_default();
    let day = DayValidationResponse::from_parts(activity, *provider.criteria());
    Ok(summarize(streak.current, ladder, &day))
}

pub fn handle_status(
    conn: &Connection,
    config: &AppConfig,
    ladder: &LevelLadder,
    json: bool,
) -> Result<()> {
    let summary = todays_summary(conn, config, ladder)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Serializing summary")?
        );
        return Ok(());
    }

    println!();
    match &summary.current_level {
        Some(level) => println_colored!(FLAME, "  {}  {}", level.icon, level.name),
        None => println_colored!(DIM, "  No flame yet"),
    }
    println_colored!(BOLD, "  Streak: {}", format_days(summary.streak));

    match &summary.next_level {
        Some(next) => {
            println!(
                "  {} {}  {} to {}",
                progress_bar(summary.progress_to_next, 20),
                format_fraction(summary.progress_to_next),
                format_days(summary.days_remaining),
                next.name
            );
        }
        None => println_colored!(FLAME, "  {} Max level reached", progress_bar(1.0, 20)),
    }

    println!();
    println_colored!(DIM, "  Today");
    let rule_color = |met: bool| if met { GREEN } else { RED };
    println_colored!(
        rule_color(summary.meets_completion_rate),
        "  {} Completion rate {}% (need {}%)",
        check_mark(summary.meets_completion_rate),
        summary.overall_rate,
        config.validation.required_completion_rate
    );
    println_colored!(
        rule_color(summary.meets_min_tasks),
        "  {} At least {} task(s) done",
        check_mark(summary.meets_min_tasks),
        config.validation.required_min_tasks
    );
    if let (Some(met), Some(required)) = (
        summary.meets_focus_sessions,
        config.validation.required_focus_sessions,
    ) {
        println_colored!(
            rule_color(met),
            "  {} At least {} focus session(s)",
            check_mark(met),
            required
        );
    }

    println!();
    if summary.is_valid {
        println_colored!(GREEN, "  Today counts toward your streak.");
    } else {
        println_colored!(AMBER, "  Today does not count yet.");
    }
    println!();
    Ok(())
}

// ─── Levels ──────────────────────────────────────────────────────────────────

pub fn handle_levels(conn: &Connection, config: &AppConfig, ladder: &LevelLadder) -> Result<()> {
    let provider = SqliteProvider::new(conn, config.validation.criteria());
    let streak = provider.streak(today())?;

    println!();
    println_colored!(BOLD, "  Flame levels  (streak: {})", format_days(streak.current));
    println!();
    for status in level_statuses(streak.current, ladder.levels()) {
        let level = status.level;
        let line = format!(
            "  {:>2}. {} {:<10} {:>4} days",
            level.level, level.icon, level.name, level.days_required
        );
        if status.is_current {
            println_colored!(FLAME, "{}  ← current", line);
        } else if status.is_unlocked {
            println_colored!(GREEN, "{}", line);
        } else {
            println_colored!(DIM, "{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Check ───────────────────────────────────────────────────────────────────

pub fn handle_check(ladder: &LevelLadder, streak: u32) -> Result<()> {
    let summary = check_snapshot(ladder, streak, io::stdin().lock())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Serializing summary")?
    );
    Ok(())
}

fn check_snapshot(ladder: &LevelLadder, streak: u32, reader: impl Read) -> Result<StreakSummary> {
    let day: DayValidationResponse =
        serde_json::from_reader(reader).context("Reading day snapshot from stdin")?;
    let activity = day.activity();
    check_counts(
        activity.total_items,
        activity.completed_items,
        activity.completed_qualifying,
    )?;
    Ok(summarize(streak, ladder, &day))
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig, week: bool) -> Result<()> {
    let today = today();
    let criteria = config.validation.criteria();
    let streak = StatsRepo::calculate_streak(conn, &criteria, today)?;

    println!();
    println_colored!(FLAME, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Streak:  {} current  |  {} best",
        format_days(streak.current),
        format_days(streak.best)
    );

    if week {
        let week_start = today - Duration::days(6);
        let daily = StatsRepo::get_daily_stats_range(conn, &criteria, week_start, today)?;

        println!();
        println_colored!(
            DIM,
            "  Last 7 days  (● = valid, ◑ = partial, ○ = nothing, · = not logged)"
        );
        println!();
        print!("  ");
        let mut date = week_start;
        while date <= today {
            let key = date.format("%Y-%m-%d").to_string();
            let icon = match daily.iter().find(|d| d.date == key) {
                Some(d) if d.result.is_valid => format!("{}●\x1b[0m ", GREEN),
                Some(d) if d.completed_items > 0 => format!("{}◑\x1b[0m ", AMBER),
                Some(_) => format!("{}○\x1b[0m ", DIM),
                None => format!("{}·\x1b[0m ", DIM),
            };
            print!("{}", icon);
            date += Duration::days(1);
        }
        println!();
    }

    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Prints where the config file lives. Never reads the file.
pub fn handle_config_path() -> Result<()> {
    println!("{}", config_path_line()?);
    Ok(())
}

fn config_path_line() -> Result<String> {
    Ok(AppConfig::config_path()?.display().to_string())
}

pub fn handle_config(config: &AppConfig, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Path => handle_config_path()?,
        ConfigCommands::Show => {
            print!(
                "{}",
                toml::to_string_pretty(config).context("Serializing config")?
            );
        }
        ConfigCommands::Init => {
            config.save()?;
            println_colored!(
                GREEN,
                "  ✓ Wrote {}",
                AppConfig::config_path()?.display()
            );
        }
    }
    Ok(())
}
