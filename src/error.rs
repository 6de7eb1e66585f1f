//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failed (connect, timeout, body read)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Coarse error category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Status,
    Decode,
    NotFound,
    Validation,
    Config,
    Io,
}

impl ErrorKind {
    /// Short label for dialogs and the activity log.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Connection problem",
            ErrorKind::Status => "Server error",
            ErrorKind::Decode => "Unexpected response",
            ErrorKind::NotFound => "Not found",
            ErrorKind::Validation => "Invalid input",
            ErrorKind::Config => "Configuration",
            ErrorKind::Io => "File error",
        }
    }
}

impl AppError {
    /// Create a decode error with message
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            // reqwest reports JSON body failures as decode errors
            AppError::Http(e) if e.is_decode() => ErrorKind::Decode,
            AppError::Http(_) => ErrorKind::Network,
            AppError::Status { .. } => ErrorKind::Status,
            AppError::Decode(_) => ErrorKind::Decode,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Config(_) => ErrorKind::Config,
            AppError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(AppError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(AppError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::Status {
                status: 500,
                url: "http://localhost/api/crews".to_string()
            }
            .kind(),
            ErrorKind::Status
        );
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: AppError = serde_json::from_str::<Vec<i32>>("{nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_status_message() {
        let err = AppError::Status {
            status: 404,
            url: "http://localhost:5001/api/customers/9".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 404 for http://localhost:5001/api/customers/9");
    }
}
