use std::path::PathBuf;

use tracing::debug;

use storycast_core::types::Weekday;

use crate::error::Result;

/// Posting markers — the same-day idempotence guard.
///
/// One file per `(day, username)` pair; its mere existence means "already
/// posted for this day+user". The body is an RFC3339 timestamp for human
/// inspection, nothing reads it back. Markers are never cleared by the
/// system — delete the file by hand to allow re-posting on the same day.
pub struct MarkerStore {
    dir: PathBuf,
}

impl MarkerStore {
    /// Open the store, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, day: Weekday, username: &str) -> PathBuf {
        self.dir.join(format!("posted_{day}_{username}.txt"))
    }

    /// Has this day+user already completed a posting pass?
    pub fn posted(&self, day: Weekday, username: &str) -> bool {
        self.path_for(day, username).exists()
    }

    /// Record a completed pass (set after the file loop, even when
    /// individual uploads failed).
    pub fn mark(&self, day: Weekday, username: &str) -> Result<()> {
        let path = self.path_for(day, username);
        std::fs::write(&path, chrono::Utc::now().to_rfc3339())?;
        debug!(%username, %day, "posting marker set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_flips_on_mark() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MarkerStore::new(dir.path()).expect("store");

        assert!(!store.posted(Weekday::Monday, "alice"));
        store.mark(Weekday::Monday, "alice").expect("mark");
        assert!(store.posted(Weekday::Monday, "alice"));
    }

    #[test]
    fn markers_are_keyed_by_day_and_user() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MarkerStore::new(dir.path()).expect("store");

        store.mark(Weekday::Monday, "alice").expect("mark");
        assert!(!store.posted(Weekday::Tuesday, "alice"));
        assert!(!store.posted(Weekday::Monday, "bob"));
        assert!(dir.path().join("posted_monday_alice.txt").exists());
    }
}
