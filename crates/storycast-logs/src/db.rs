use rusqlite::Connection;

use crate::error::Result;

/// Initialise the attempt-log table.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout. The
/// integer primary key doubles as the newest-first sort key for the
/// dashboard query.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS story_logs (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            username   TEXT NOT NULL,
            day        TEXT NOT NULL,
            file_path  TEXT NOT NULL,
            status     TEXT NOT NULL,
            msg        TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );",
    )?;
    Ok(())
}
