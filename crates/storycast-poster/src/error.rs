use thiserror::Error;

/// Errors that escape a posting run.
///
/// Per-file upload failures never surface here — they become FAIL rows and
/// the batch continues. What does escape is infrastructure trouble: the log
/// table or the marker file refusing a write.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error(transparent)]
    Client(#[from] storycast_client::ClientError),

    #[error(transparent)]
    Log(#[from] storycast_logs::error::LogError),

    #[error("image conversion failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PosterError>;
