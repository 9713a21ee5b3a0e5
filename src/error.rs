// src/error.rs
//! Application error types with structured error handling.
//!
//! Error variants form the vocabulary for failure modes in the reader.
//! Classification into "retry" and "fail fast" lives in one place,
//! [`AppError::is_retryable`], so every remote call is judged the same way.

use std::error::Error as _;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Transport-level conditions a request can end in before any response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkCondition {
    ConnectionReset,
    ConnectionRefused,
    TimedOut,
    Other,
}

impl NetworkCondition {
    /// Classifies a reqwest failure by walking its source chain for an IO error kind.
    pub fn classify(err: &reqwest::Error) -> Self {
        let mut source = err.source();
        while let Some(cause) = source {
            if let Some(io) = cause.downcast_ref::<std::io::Error>() {
                match io.kind() {
                    std::io::ErrorKind::ConnectionReset => return Self::ConnectionReset,
                    std::io::ErrorKind::ConnectionRefused => return Self::ConnectionRefused,
                    std::io::ErrorKind::TimedOut => return Self::TimedOut,
                    _ => {}
                }
            }
            source = cause.source();
        }

        if err.is_timeout() {
            Self::TimedOut
        } else {
            Self::Other
        }
    }

    /// Whether a fresh attempt has a reasonable chance of succeeding.
    pub fn is_transient(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for NetworkCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionReset => write!(f, "connection reset"),
            Self::ConnectionRefused => write!(f, "connection refused"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Other => write!(f, "transport failure"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure ({condition}): {message}")]
    Network {
        condition: NetworkCondition,
        message: String,
    },

    #[error("Notion API returned an error ({code}, HTTP {status}): {message}")]
    Api {
        status: u16,
        code: NotionErrorCode,
        message: String,
    },

    #[error("{label} failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        label: String,
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    #[error("Expected a {expected} object but the API returned '{actual}'")]
    UnexpectedObject {
        expected: &'static str,
        actual: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to deserialize response: {source}\nBody: {body}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Block {id} of kind '{kind}' could not be rendered: {reason}")]
    MalformedBlock {
        id: String,
        kind: String,
        reason: String,
    },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether re-issuing the same call is expected to eventually succeed.
    ///
    /// Rate limiting (429), any server-side status (5xx) and connection
    /// reset / refused / timed-out conditions are retryable; everything
    /// else fails fast.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Api { status, .. } => *status == 429 || (500..600).contains(status),
            AppError::Network { condition, .. } => condition.is_transient(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return AppError::Api {
                status: status.as_u16(),
                code: NotionErrorCode::from_http_status(status.as_u16()),
                message: err.to_string(),
            };
        }

        AppError::Network {
            condition: NetworkCondition::classify(&err),
            message: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> AppError {
        AppError::Api {
            status,
            code: NotionErrorCode::from_http_status(status),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        assert!(api_error(429).is_retryable());
        assert!(api_error(500).is_retryable());
        assert!(api_error(503).is_retryable());
        assert!(api_error(599).is_retryable());
    }

    #[test]
    fn client_errors_fail_fast() {
        assert!(!api_error(400).is_retryable());
        assert!(!api_error(401).is_retryable());
        assert!(!api_error(404).is_retryable());
        assert!(!AppError::MalformedResponse("bad".into()).is_retryable());
    }

    #[test]
    fn transient_network_conditions_are_retryable() {
        for condition in [
            NetworkCondition::ConnectionReset,
            NetworkCondition::ConnectionRefused,
            NetworkCondition::TimedOut,
        ] {
            let err = AppError::Network {
                condition,
                message: "socket".into(),
            };
            assert!(err.is_retryable(), "{condition} should be retryable");
        }

        let other = AppError::Network {
            condition: NetworkCondition::Other,
            message: "tls handshake".into(),
        };
        assert!(!other.is_retryable());
    }

    #[test]
    fn exhausted_retries_are_not_retried_again() {
        let err = AppError::RetriesExhausted {
            label: "list children".into(),
            attempts: 4,
            source: Box::new(api_error(503)),
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("list children failed after 4 attempt(s)"));
    }

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in ["rate_limited", "object_not_found", "validation_error"] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
    }
}
