use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorycastError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required user input was missing or malformed (empty username,
    /// out-of-range hour, …). Surfaced to the panel, never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The scheduler was started with an empty account list.
    #[error("No accounts configured")]
    NoAccounts,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorycastError {
    /// Short error code string included in panel JSON error responses.
    pub fn code(&self) -> &'static str {
        match self {
            StorycastError::Config(_) => "CONFIG_ERROR",
            StorycastError::Validation(_) => "VALIDATION_ERROR",
            StorycastError::NoAccounts => "NO_ACCOUNTS",
            StorycastError::Database(_) => "DATABASE_ERROR",
            StorycastError::Serialization(_) => "SERIALIZATION_ERROR",
            StorycastError::Io(_) => "IO_ERROR",
            StorycastError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, StorycastError>;
