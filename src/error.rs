//! Error types for the urturn client
//!
//! This module defines the crate-level error hierarchy. Library APIs that can
//! fail for reasons other than caller input return `Result<T, Error>`.
//! Caller-facing failures are reported as [`ErrorRecord`](crate::report::ErrorRecord)s,
//! and [`Error::error_code`] bridges the two.

use crate::report::{ErrorCode, ErrorRecord};
use thiserror::Error;

/// The main error type for the urturn client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Failed to construct transport: {message}")]
    TransportInit { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Api(#[from] ErrorRecord),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a transport construction error
    pub fn transport_init(message: impl Into<String>) -> Self {
        Self::TransportInit {
            message: message.into(),
        }
    }

    /// The caller-facing code this error is reported under
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Error::TransportInit { .. } => ErrorCode::TransportInit,
            Error::Timeout { .. } => ErrorCode::TransportTimeout,
            Error::Http(e) if e.is_timeout() => ErrorCode::TransportTimeout,
            Error::Api(record) => record.error_code().unwrap_or(ErrorCode::TransportError),
            _ => ErrorCode::TransportError,
        }
    }
}

/// Result type alias for the urturn client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_value("scheme", "empty");
        assert_eq!(err.to_string(), "Invalid config value for 'scheme': empty");

        let err = Error::missing_field("host");
        assert_eq!(err.to_string(), "Missing required config field: host");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            Error::transport_init("tls backend").error_code(),
            ErrorCode::TransportInit
        );
        assert_eq!(
            Error::Timeout { timeout_ms: 500 }.error_code(),
            ErrorCode::TransportTimeout
        );
        assert_eq!(
            Error::http_status(500, "").error_code(),
            ErrorCode::TransportError
        );
        assert_eq!(
            Error::missing_field("host").error_code(),
            ErrorCode::TransportError
        );

        let record = crate::report::ErrorRecord::from_kind(
            "get",
            &crate::report::ErrorKind::MissingQuery,
        );
        assert_eq!(Error::from(record).error_code(), ErrorCode::MissingQuery);

        let record = crate::report::ErrorRecord::from_kind(
            "get",
            &crate::report::ErrorKind::NoTransport,
        );
        assert_eq!(Error::from(record).error_code(), ErrorCode::NoTransport);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::missing_field("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Missing required config field: inner"));
    }
}
