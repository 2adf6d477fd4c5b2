use rollcall_primitives::AddressError;
use thiserror::Error;

/// Result type for spreadsheet operations.
pub type SheetsResult<T> = Result<T, SheetsError>;

/// Errors raised while talking to the spreadsheet backend.
///
/// The `Display` output is what callers hand back to HTTP clients, so
/// remote failures (API, token and transport) render the underlying message
/// unchanged.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Service-account credentials could not be parsed.
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// Token acquisition failed.
    #[error("{0}")]
    Auth(String),

    /// Transport-level failure (connect, timeout, body read).
    #[error("{0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A range could not be built.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetsError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
