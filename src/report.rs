//! Caller-facing error records
//!
//! Every failure a caller can observe (bad input, no transport, network
//! failure) is delivered as an [`ErrorRecord`]. Records are built from a
//! method name and an [`ErrorCode`], with the human-readable message taken
//! from a fixed table and filled in from structured parameters.

use crate::template::{self, Params};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Namespace prefixed to every `api_method`
pub const API_NAMESPACE: &str = "urturn";

/// Message used when a code has no entry in the table
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error happened.";

// ============================================================================
// Error codes
// ============================================================================

/// Codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "MISSING_QUERY")]
    MissingQuery,
    #[serde(rename = "MISSING_QUERY_TYPE")]
    MissingQueryType,
    #[serde(rename = "MISSING_QUERY_SELECTOR")]
    MissingQuerySelector,
    #[serde(rename = "WRONG_FORMAT")]
    WrongFormat,
    #[serde(rename = "UNKNOWN_QUERY_TYPE")]
    UnknownQueryType,
    #[serde(rename = "UNKNOWN_QUERY_SELECTOR")]
    UnknownQuerySelector,
    /// No transport mechanism is available
    #[serde(rename = "NO_XHR", alias = "NO_TRANSPORT")]
    NoTransport,
    /// The transport exists but could not be constructed
    #[serde(rename = "XHR_IE_FAIL")]
    TransportInit,
    #[serde(rename = "XHR_ERROR")]
    TransportError,
    #[serde(rename = "XHR_TIMEOUT")]
    TransportTimeout,
}

impl ErrorCode {
    /// All codes, in table order
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::MissingQuery,
        ErrorCode::MissingQueryType,
        ErrorCode::MissingQuerySelector,
        ErrorCode::WrongFormat,
        ErrorCode::UnknownQueryType,
        ErrorCode::UnknownQuerySelector,
        ErrorCode::NoTransport,
        ErrorCode::TransportInit,
        ErrorCode::TransportError,
        ErrorCode::TransportTimeout,
    ];

    /// Wire name of the code
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingQuery => "MISSING_QUERY",
            ErrorCode::MissingQueryType => "MISSING_QUERY_TYPE",
            ErrorCode::MissingQuerySelector => "MISSING_QUERY_SELECTOR",
            ErrorCode::WrongFormat => "WRONG_FORMAT",
            ErrorCode::UnknownQueryType => "UNKNOWN_QUERY_TYPE",
            ErrorCode::UnknownQuerySelector => "UNKNOWN_QUERY_SELECTOR",
            ErrorCode::NoTransport => "NO_XHR",
            ErrorCode::TransportInit => "XHR_IE_FAIL",
            ErrorCode::TransportError => "XHR_ERROR",
            ErrorCode::TransportTimeout => "XHR_TIMEOUT",
        }
    }

    /// Message template for this code
    pub fn template(self) -> &'static str {
        match self {
            ErrorCode::MissingQuery => {
                "No query in options hash. We do not know what to search."
            }
            ErrorCode::MissingQueryType => {
                "No queryType in options hash. We do not know what to search."
            }
            ErrorCode::MissingQuerySelector => {
                "No querySelector in options hash. We do not know what to search."
            }
            ErrorCode::WrongFormat => "{key} should be a {expected}, was a {type} instead!",
            ErrorCode::UnknownQueryType => "{value} is not a supported queryType.",
            ErrorCode::UnknownQuerySelector => {
                "{value} is not a supported querySelector for {queryType}."
            }
            ErrorCode::NoTransport => "No transport available to reach the urturn API.",
            ErrorCode::TransportInit => "The HTTP transport could not be constructed.",
            ErrorCode::TransportError => "There was an error on urturn server.",
            ErrorCode::TransportTimeout => "Request to urturn server Timeout.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "NO_TRANSPORT" {
            return Ok(ErrorCode::NoTransport);
        }
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown error code: {s}"))
    }
}

// ============================================================================
// Error kinds
// ============================================================================

/// A failure with its structured details
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MissingQuery,
    MissingQueryType,
    MissingQuerySelector,
    /// A field had the wrong type
    WrongFormat {
        /// Offending key, e.g. `options.perPage`
        key: String,
        /// Expected type name
        expected: &'static str,
        /// Observed `typeof` name
        found: &'static str,
    },
    UnknownQueryType {
        value: String,
    },
    UnknownQuerySelector {
        query_type: String,
        value: String,
    },
    NoTransport,
    TransportInit {
        detail: String,
    },
    Transport {
        detail: String,
    },
    Timeout {
        detail: String,
    },
}

impl ErrorKind {
    /// Build a wrong-format error for a key
    pub fn wrong_format(
        key: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::WrongFormat {
            key: key.into(),
            expected,
            found,
        }
    }

    /// Map a crate error onto the kind reported to callers
    pub fn from_error(error: &crate::Error) -> Self {
        let detail = error.to_string();
        match error.error_code() {
            ErrorCode::NoTransport => Self::NoTransport,
            ErrorCode::TransportInit => Self::TransportInit { detail },
            ErrorCode::TransportTimeout => Self::Timeout { detail },
            _ => Self::Transport { detail },
        }
    }

    /// The code this kind is reported under
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::MissingQuery => ErrorCode::MissingQuery,
            ErrorKind::MissingQueryType => ErrorCode::MissingQueryType,
            ErrorKind::MissingQuerySelector => ErrorCode::MissingQuerySelector,
            ErrorKind::WrongFormat { .. } => ErrorCode::WrongFormat,
            ErrorKind::UnknownQueryType { .. } => ErrorCode::UnknownQueryType,
            ErrorKind::UnknownQuerySelector { .. } => ErrorCode::UnknownQuerySelector,
            ErrorKind::NoTransport => ErrorCode::NoTransport,
            ErrorKind::TransportInit { .. } => ErrorCode::TransportInit,
            ErrorKind::Transport { .. } => ErrorCode::TransportError,
            ErrorKind::Timeout { .. } => ErrorCode::TransportTimeout,
        }
    }

    /// Template parameters carried by this kind
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        match self {
            ErrorKind::WrongFormat {
                key,
                expected,
                found,
            } => {
                params.insert("key".into(), key.clone());
                params.insert("expected".into(), (*expected).to_string());
                params.insert("type".into(), (*found).to_string());
            }
            ErrorKind::UnknownQueryType { value } => {
                params.insert("value".into(), value.clone());
            }
            ErrorKind::UnknownQuerySelector { query_type, value } => {
                params.insert("queryType".into(), query_type.clone());
                params.insert("value".into(), value.clone());
            }
            _ => {}
        }
        params
    }

    fn detail(&self) -> Option<String> {
        match self {
            ErrorKind::TransportInit { detail }
            | ErrorKind::Transport { detail }
            | ErrorKind::Timeout { detail } => Some(detail.clone()),
            _ => None,
        }
    }
}

// ============================================================================
// Error record
// ============================================================================

/// Error delivered to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Fully-qualified method, e.g. `urturn.get`
    pub api_method: String,
    /// Wire code, e.g. `WRONG_FORMAT`
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Underlying cause for transport failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Offending key for `WRONG_FORMAT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ErrorRecord {
    /// Build a record from a raw code string.
    ///
    /// Unknown codes keep the code as given and get the generic message.
    pub fn build(method: &str, code: &str, params: &Params) -> Self {
        let message = match code.parse::<ErrorCode>() {
            Ok(known) => template::render(known.template(), params),
            Err(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
        };
        if template::has_placeholders(&message) {
            debug!("Message for {} left placeholders unfilled: {}", code, message);
        }

        Self {
            api_method: format!("{API_NAMESPACE}.{method}"),
            code: code.to_string(),
            message,
            detail: None,
            key: params.get("key").cloned(),
        }
    }

    /// Build a record from a structured kind
    pub fn from_kind(method: &str, kind: &ErrorKind) -> Self {
        let mut record = Self::build(method, kind.code().as_str(), &kind.params());
        record.detail = kind.detail();
        record
    }

    /// The parsed code, if it is one of the known codes
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code.parse().ok()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.api_method, self.code, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorRecord {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_round_trips_through_str() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
    }

    #[test]
    fn test_no_transport_alias() {
        assert_eq!("NO_TRANSPORT".parse::<ErrorCode>(), Ok(ErrorCode::NoTransport));
        let code: ErrorCode = serde_json::from_str("\"NO_TRANSPORT\"").unwrap();
        assert_eq!(code, ErrorCode::NoTransport);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"NO_XHR\"");
    }

    #[test]
    fn test_build_known_code() {
        let record = ErrorRecord::build("get", "MISSING_QUERY", &Params::new());
        assert_eq!(record.api_method, "urturn.get");
        assert_eq!(record.code, "MISSING_QUERY");
        assert_eq!(
            record.message,
            "No query in options hash. We do not know what to search."
        );
        assert!(record.key.is_none());
    }

    #[test]
    fn test_build_unknown_code() {
        let record = ErrorRecord::build("get", "SOMETHING_ELSE", &Params::new());
        assert_eq!(record.code, "SOMETHING_ELSE");
        assert_eq!(record.message, UNKNOWN_ERROR_MESSAGE);
        assert_eq!(record.error_code(), None);
    }

    #[test]
    fn test_wrong_format_message_is_filled_in() {
        let kind = ErrorKind::wrong_format("options.perPage", "Number", "string");
        let record = ErrorRecord::from_kind("get", &kind);
        assert_eq!(record.code, "WRONG_FORMAT");
        assert_eq!(record.key.as_deref(), Some("options.perPage"));
        assert_eq!(
            record.message,
            "options.perPage should be a Number, was a string instead!"
        );
        assert_eq!(record.error_code(), Some(ErrorCode::WrongFormat));
    }

    #[test]
    fn test_transport_kind_carries_detail() {
        let kind = ErrorKind::from_error(&crate::Error::http_status(503, "down"));
        let record = ErrorRecord::from_kind("get", &kind);
        assert_eq!(record.code, "XHR_ERROR");
        assert_eq!(record.detail.as_deref(), Some("HTTP 503: down"));
        assert_eq!(
            record.to_string(),
            "urturn.get [XHR_ERROR]: There was an error on urturn server. (HTTP 503: down)"
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ErrorRecord::from_kind("get", &ErrorKind::NoTransport);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "apiMethod": "urturn.get",
                "code": "NO_XHR",
                "message": "No transport available to reach the urturn API."
            })
        );
    }
}
