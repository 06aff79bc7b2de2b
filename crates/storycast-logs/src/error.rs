use thiserror::Error;

/// Errors that can occur while writing or reading the attempt log.
#[derive(Debug, Error)]
pub enum LogError {
    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored status string did not parse back into [`AttemptStatus`].
    ///
    /// [`AttemptStatus`]: crate::types::AttemptStatus
    #[error("corrupt log row: {0}")]
    CorruptRow(String),
}

pub type Result<T> = std::result::Result<T, LogError>;
