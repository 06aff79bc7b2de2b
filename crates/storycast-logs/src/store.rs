use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, instrument};

use storycast_core::types::Weekday;

use crate::db::init_db;
use crate::error::Result;
use crate::types::{AttemptRow, AttemptStatus};

/// Thread-safe, append-only store over the `story_logs` table.
///
/// Wraps a single SQLite connection in a `Mutex`; each append or read is its
/// own transaction. The panel and the posting job open separate connections
/// to the same file, so neither blocks the other across calls.
pub struct LogStore {
    db: Mutex<Connection>,
}

impl LogStore {
    /// Wrap a connection, initialising the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Append one attempt row. Exactly one call per upload attempt — the
    /// posting job invokes this before moving to the next file.
    #[instrument(skip_all, fields(username = %username, day = %day, status = %status))]
    pub fn append(
        &self,
        username: &str,
        day: Weekday,
        file_path: &Path,
        status: AttemptStatus,
        msg: &str,
    ) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO story_logs (username, day, file_path, status, msg, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                username,
                day.to_string(),
                file_path.display().to_string(),
                status.to_string(),
                msg,
                now
            ],
        )?;
        debug!("attempt logged");
        Ok(())
    }

    /// The most recent `limit` rows, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<AttemptRow>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, username, day, file_path, status, msg, created_at
             FROM story_logs ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit as i64], row_to_attempt)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

/// Map a SQLite row to an `AttemptRow`.
///
/// A row whose status string no longer parses is dropped by the caller's
/// `filter_map` rather than failing the whole dashboard read.
fn row_to_attempt(row: &rusqlite::Row<'_>) -> rusqlite::Result<AttemptRow> {
    let status_str: String = row.get(4)?;
    let status = AttemptStatus::from_str(&status_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown status: {status_str}").into(),
        )
    })?;
    Ok(AttemptRow {
        id: row.get(0)?,
        username: row.get(1)?,
        day: row.get(2)?,
        file_path: row.get(3)?,
        status,
        msg: row.get(5)?,
        created_at: row.get(6)?,
    })
}
