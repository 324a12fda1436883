//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Paging failures come in two flavors. [`Error::InvalidPagingArgument`] is
/// raised for values that came from a client (query parameters, page indices)
/// and always maps to `400 Bad Request`. [`Error::Precondition`] is raised when
/// a caller hands internally inconsistent values to the model, which is a bug in
/// the calling code rather than bad user input.
#[derive(Debug, Error)]
pub enum Error {
    /// A page index, page size, or sort specification was out of bounds or malformed
    #[error("Invalid paging argument: {0}")]
    InvalidPagingArgument(String),

    /// Inputs handed to the model by the calling code were inconsistent
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),
}

impl Error {
    /// Create an invalid paging argument error
    pub fn invalid_paging(message: impl Into<String>) -> Self {
        Self::InvalidPagingArgument(message.into())
    }

    /// Create a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Whether the error was caused by client input
    ///
    /// # Example
    ///
    /// ```rust
    /// use tempest_rest::error::Error;
    ///
    /// assert!(Error::invalid_paging("Cannot read a negative page").is_client_error());
    /// assert!(!Error::precondition("elements exceed total").is_client_error());
    /// ```
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPagingArgument(_))
    }

    /// HTTP status code this error maps to
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPagingArgument(_) => StatusCode::BAD_REQUEST,
            Self::Precondition(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            Error::InvalidPagingArgument(msg) => {
                ErrorResponse::with_code(status, "INVALID_PAGING_ARGUMENT", msg)
            }

            Error::Precondition(msg) => {
                tracing::error!("Precondition failed: {}", msg);
                ErrorResponse::with_code(status, "PRECONDITION_FAILED", "Internal server error")
            }

            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                ErrorResponse::with_code(status, "CONFIG_ERROR", "Service misconfigured")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
