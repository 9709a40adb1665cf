//! Error types for corganize API operations.

use thiserror::Error;

/// Errors that can occur during corganize API operations.
#[derive(Debug, Error)]
pub enum CorganizeError {
    /// Client configuration is missing or invalid.
    #[error("Invalid corganize configuration: {0}")]
    InvalidConfig(String),

    /// The service answered with a non-success status.
    ///
    /// `message` is the raw response body, or `HTTP <status>` when the body
    /// was empty.
    #[error("corganize API error (HTTP {status_code}): {message}")]
    ApiError { message: String, status_code: u16 },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl CorganizeError {
    /// HTTP status of a failed API call, if this error came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => Some(*status_code),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the service reported 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for corganize operations.
pub type Result<T> = core::result::Result<T, CorganizeError>;
