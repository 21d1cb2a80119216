//! Error types for RSSI event detection
//!
//! Provides a unified error type for all rssi crates.

use thiserror::Error;

/// Core error type for filter, series and log operations
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter value rejected for a reason other than its syntax
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Parameter string has the wrong number of comma-separated fields
    #[error("Invalid parameter for '{filter}': expected {expected} field(s), got {actual}")]
    ParameterCount {
        filter: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A single parameter field could not be parsed
    #[error("Invalid parameter for '{filter}': field {index} ('{field}') {reason}")]
    MalformedField {
        filter: &'static str,
        index: usize,
        field: String,
        reason: String,
    },

    /// Registry lookup failed
    #[error("Filter not found: {0}")]
    FilterNotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Timestamp and value arrays differ in length
    #[error("Length mismatch: {timestamps} timestamps, {values} values")]
    LengthMismatch { timestamps: usize, values: usize },

    /// Series timestamps must be non-decreasing
    #[error("Timestamps out of order at index {index}")]
    UnorderedTimestamps { index: usize },

    /// A log line could not be parsed
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// IO error (for reading log lines)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a field that is not a number of the expected kind
    pub fn malformed(filter: &'static str, index: usize, field: &str, reason: &str) -> Self {
        Self::MalformedField {
            filter,
            index,
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a window that is not a positive duration
    pub fn invalid_window(seconds: f64) -> Self {
        Self::InvalidParameter(format!("Window {seconds} s must be positive and finite"))
    }

    /// Create an error for a zero-capacity accumulator or sample window
    pub fn zero_capacity(context: &str) -> Self {
        Self::InvalidParameter(format!("{context} must hold at least one sample"))
    }

    /// Whether this error came from parsing a parameter string
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter(_) | Self::ParameterCount { .. } | Self::MalformedField { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ParameterCount {
            filter: "moving_average",
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter for 'moving_average': expected 1 field(s), got 2"
        );

        let err = Error::malformed("youssef2007a", 2, "abc", "is not a number");
        assert_eq!(
            err.to_string(),
            "Invalid parameter for 'youssef2007a': field 2 ('abc') is not a number"
        );

        let err = Error::FilterNotFound("median".to_string());
        assert_eq!(err.to_string(), "Filter not found: median");

        let err = Error::LengthMismatch { timestamps: 3, values: 2 };
        assert_eq!(err.to_string(), "Length mismatch: 3 timestamps, 2 values");

        let err = Error::InvalidRecord { line: 7, reason: "missing rssi".to_string() };
        assert_eq!(err.to_string(), "Invalid record at line 7: missing rssi");
    }

    #[test]
    fn test_parameter_error_classification() {
        assert!(Error::invalid_window(-1.0).is_parameter_error());
        assert!(Error::zero_capacity("Accumulator").is_parameter_error());
        assert!(Error::malformed("wang2013", 0, "x", "is not a number").is_parameter_error());
        assert!(!Error::FilterNotFound("x".to_string()).is_parameter_error());
        assert!(!Error::UnorderedTimestamps { index: 3 }.is_parameter_error());
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "log not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => assert!(err.to_string().contains("log not found")),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("viewer closed").into();
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("viewer closed"));
    }
}
