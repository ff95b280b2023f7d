use anyhow::Result;
use log::debug;
use rusqlite::Connection;

const SCHEMA_VERSION: &str = "1";

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS day_log (
            date                 TEXT PRIMARY KEY,
            total_items          INTEGER NOT NULL DEFAULT 0 CHECK(total_items >= 0),
            completed_items      INTEGER NOT NULL DEFAULT 0
                                 CHECK(completed_items >= 0 AND completed_items <= total_items),
            qualifying_completed INTEGER NOT NULL DEFAULT 0 CHECK(qualifying_completed >= 0),
            focus_sessions       INTEGER,
            updated_at           TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    conn.execute(
        "INSERT OR IGNORE INTO app_meta (key, value) VALUES ('schema_version', ?1)",
        rusqlite::params![SCHEMA_VERSION],
    )?;
    debug!("Migrations applied (schema v{})", SCHEMA_VERSION);
    Ok(())
}
