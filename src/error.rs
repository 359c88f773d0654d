// Error types for the folio data layer.
// Distinguishes rate limiting and a missing comments tracker from
// generic GitHub API failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("{message}")]
    RateLimited { message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl FolioError {
    /// Whether this error came from a cooperative cancellation.
    /// Callers treat cancelled fetches as no-ops, not failures.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FolioError::Cancelled)
    }

    /// Whether this error is the anonymous rate limit kicking in.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FolioError::RateLimited { .. })
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
