mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use kindle::config::AppConfig;
use kindle::db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.command.as_ref().is_some_and(|cmd| !cmd.needs_config()) {
        return handlers::handle_config_path();
    }

    let config = AppConfig::load().context("Loading config")?;
    // Fail before touching the database if the ladder is unusable.
    let ladder = config.ladder().context("Loading flame levels")?;

    match cli.command {
        // `check` works purely on stdin and never needs the local log
        Some(Commands::Check { streak }) => {
            handlers::handle_check(&ladder, streak)?;
        }
        Some(Commands::Config { action }) => {
            handlers::handle_config(&config, &action)?;
        }
        Some(Commands::Log {
            total,
            completed,
            qualifying,
            focus,
            date,
        }) => {
            let conn = open_db()?;
            handlers::handle_log(&conn, date.as_deref(), total, completed, qualifying, focus)?;
        }
        Some(Commands::Status { json }) => {
            let conn = open_db()?;
            handlers::handle_status(&conn, &config, &ladder, json)?;
        }
        Some(Commands::Levels) => {
            let conn = open_db()?;
            handlers::handle_levels(&conn, &config, &ladder)?;
        }
        Some(Commands::Stats { week }) => {
            let conn = open_db()?;
            handlers::handle_stats(&conn, &config, week)?;
        }
        None => {
            let conn = open_db()?;
            handlers::handle_status(&conn, &config, &ladder, false)?;
        }
    }

    Ok(())
}

/// Open the local day log and bring its schema up to date.
fn open_db() -> Result<Connection> {
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    Ok(conn)
}
