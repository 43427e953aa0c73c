use thiserror::Error;

/// Errors surfaced by the notes HTTP client.
///
/// All variants are terminal for the attempt; callers decide how to recover.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
