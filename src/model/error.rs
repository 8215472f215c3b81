//! Model error types
//!
//! Errors raised while parsing wire or user-supplied values into model types.

use thiserror::Error;

/// Errors that can occur when parsing model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Date is neither `YYYY-MM-DD` nor an RFC 3339 timestamp
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Category is not one of the enumerated expense types
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),
}

/// Result type alias for model parsing
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::InvalidDate("03/01/2024".to_string());
        assert_eq!(err.to_string(), "Invalid date: \"03/01/2024\"");

        let err = ParseError::UnknownCategory("Travel".to_string());
        assert_eq!(err.to_string(), "Unknown category: \"Travel\"");
    }
}
