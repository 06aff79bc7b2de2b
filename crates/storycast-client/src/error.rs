use thiserror::Error;

/// Errors from the platform client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The platform rejected the credentials. Aborts the account's posting
    /// run for the day — no retry until the next scheduled trigger.
    #[error("authentication failed for {username}: {message}")]
    Auth { username: String, message: String },

    /// Non-success response from the platform API outside of login/upload.
    #[error("platform API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A story upload was rejected. Per-file — the batch continues.
    #[error("upload failed (status {status}): {message}")]
    Upload { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
