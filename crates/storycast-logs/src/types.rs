use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Outcome of a single upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttemptStatus {
    Success,
    Fail,
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttemptStatus::Success => "SUCCESS",
            AttemptStatus::Fail => "FAIL",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SUCCESS" => Ok(AttemptStatus::Success),
            "FAIL" => Ok(AttemptStatus::Fail),
            other => Err(LogError::CorruptRow(format!("unknown status: {other}"))),
        }
    }
}

/// One row of the `story_logs` table.
///
/// `day` keeps its stored lowercase form ("monday") — the dashboard renders
/// it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRow {
    /// Autoincrement primary key; also the newest-first sort key.
    pub id: i64,
    pub username: String,
    pub day: String,
    pub file_path: String,
    pub status: AttemptStatus,
    /// Error message for FAIL rows; empty on success.
    pub msg: String,
    /// RFC3339 insert timestamp.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_roundtrip() {
        for status in [AttemptStatus::Success, AttemptStatus::Fail] {
            assert_eq!(AttemptStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(AttemptStatus::from_str("success").is_err());
        assert!(AttemptStatus::from_str("RETRY").is_err());
    }
}
