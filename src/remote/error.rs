//! Remote store error types

use thiserror::Error;

/// Errors that can occur when talking to the expense store
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Expense store unavailable at {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl RemoteError {
    /// Classify a transport-level failure
    pub(crate) fn from_transport(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else if err.is_connect() {
            RemoteError::Unavailable(base_url.to_string())
        } else {
            RemoteError::Request(err)
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::MalformedBody(err.to_string())
    }
}

/// Result type alias for store operations
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RemoteError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500: boom");

        let err = RemoteError::Unavailable("http://localhost:8080".to_string());
        assert_eq!(
            err.to_string(),
            "Expense store unavailable at http://localhost:8080"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: RemoteError = json_err.into();
        assert!(matches!(err, RemoteError::MalformedBody(_)));
    }
}
