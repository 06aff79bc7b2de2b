use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Opaque authenticated-session state, produced and consumed by the
/// platform implementation. This crate only moves it between disk and the
/// login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(pub serde_json::Value);

/// One JSON file per username under the configured sessions directory.
///
/// Invalidation is the platform's business (expiry, password change) — the
/// store itself never deletes anything.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the store, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}.json"))
    }

    /// Load the cached session for `username`, if any.
    ///
    /// A file that no longer parses is treated as absent — the next login
    /// overwrites it with fresh state.
    pub fn load(&self, username: &str) -> Result<Option<SessionRecord>> {
        let path = self.path_for(username);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&raw) {
            Ok(record) => {
                debug!(%username, "session cache hit");
                Ok(Some(record))
            }
            Err(e) => {
                warn!(%username, path = %path.display(), "unreadable session file, ignoring: {e}");
                Ok(None)
            }
        }
    }

    /// Persist the session for `username`, replacing any previous blob.
    pub fn save(&self, username: &str, record: &SessionRecord) -> Result<()> {
        let path = self.path_for(username);
        std::fs::write(&path, serde_json::to_string(record)?)?;
        debug!(%username, "session persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path()).expect("store");
        let record = SessionRecord(json!({"token": "abc", "device_id": "xyz"}));

        store.save("alice", &record).expect("save");
        let loaded = store.load("alice").expect("load").expect("present");
        assert_eq!(loaded, record);
    }

    #[test]
    fn missing_session_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path()).expect("store");
        assert!(store.load("nobody").expect("load").is_none());
    }

    #[test]
    fn corrupt_session_is_treated_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path()).expect("store");
        std::fs::write(dir.path().join("alice.json"), "not json {").expect("write");

        assert!(store.load("alice").expect("load").is_none());
    }

    #[test]
    fn sessions_are_per_username() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path()).expect("store");
        store
            .save("alice", &SessionRecord(json!({"token": "a"})))
            .expect("save");
        store
            .save("bob", &SessionRecord(json!({"token": "b"})))
            .expect("save");

        let alice = store.load("alice").expect("load").expect("present");
        assert_eq!(alice.0["token"], "a");
    }
}
