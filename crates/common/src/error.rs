//! Common error types and handling for Orgweb

use axum::http::StatusCode;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Orgweb application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A failure reported by a remote service, carrying its status code
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// How a failure is surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// Render the not-found page with a 404
    NotFound,
    /// Redirect with a one-shot notice carrying this message
    User(String),
    /// Render the generic internal-error page
    Server,
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authorization(_) => StatusCode::FORBIDDEN,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Error::Unexpected(_) | Error::Serialization(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code used in structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Authorization(_) => "AUTHORIZATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Upstream { .. } => "UPSTREAM_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message shown to the user, without the variant prefix
    pub fn user_message(&self) -> String {
        match self {
            Error::Authorization(msg)
            | Error::Validation(msg)
            | Error::NotFound(msg)
            | Error::Internal(msg) => msg.clone(),
            Error::Upstream { message, .. } => message.clone(),
            Error::Unexpected(e) => e.to_string(),
            Error::Serialization(e) => e.to_string(),
        }
    }

    /// Classify into not-found, user-facing, or server failure.
    ///
    /// Anything below 500 other than 404 is user-facing; 5xx and errors
    /// without a status are server failures.
    pub fn classify(&self) -> ErrorClass {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            ErrorClass::NotFound
        } else if status.as_u16() < 500 {
            ErrorClass::User(self.user_message())
        } else {
            ErrorClass::Server
        }
    }
}
