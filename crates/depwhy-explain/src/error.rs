use thiserror::Error;

/// Failure of a single text generation attempt.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection failure, timeout or an unreadable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered with HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("service returned no text")]
    EmptyText,
}
