// src/error.rs
//! Error types for every failure mode of the client.
//!
//! Decoding, encoding, configuration and transport failures each have their
//! own vocabulary. [`AppError`] is what the resource clients return and wraps
//! the others.

use crate::codec::Family;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the codes the API reports are encoded in the type system.
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

    /// Whether this error is transient. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError => true,
            Self::HttpStatus(status) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
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

/// Failures while turning parsed JSON into typed records.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The record is not an object or its discriminant is missing or not a string.
    #[error("Malformed {family} envelope: {reason}")]
    MalformedEnvelope { family: Family, reason: String },

    /// No variant is registered for the discriminant and the family has no fallback.
    #[error("Unknown {family} type '{discriminant}'")]
    UnknownType {
        family: Family,
        discriminant: String,
    },

    #[error("Missing field '{field}' in {family} '{tag}'")]
    MissingField {
        family: Family,
        tag: String,
        field: String,
    },

    #[error("Malformed field '{field}' in {family} '{tag}': {source}")]
    MalformedField {
        family: Family,
        tag: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Field '{field}' in {family} '{tag}' must be {expected}")]
    UnexpectedShape {
        family: Family,
        tag: String,
        field: String,
        expected: &'static str,
    },

    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

impl DecodeError {
    /// Whether decoding failed only because a discriminant was not recognized.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }
}

/// Failures while turning typed records back into wire JSON.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Failed to encode field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Envelope fields must encode to a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] EncodeError),

    /// The operation exists on the API but this client does not wire it up.
    #[error("Unimplemented operation: {operation}")]
    Unimplemented { operation: String },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// The Notion error code, when the failure came from the API itself.
    pub fn notion_code(&self) -> Option<&NotionErrorCode> {
        match self {
            Self::NotionService { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether a caller could reasonably try the same request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotionService { code, .. } => code.is_retryable(),
            Self::NetworkFailure(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in [
            "rate_limited",
            "object_not_found",
            "unauthorized",
            "restricted_resource",
            "invalid_json",
            "validation_error",
            "conflict_error",
            "internal_server_error",
            "service_unavailable",
            "something_new",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
    }

    #[test]
    fn classifies_retryable_codes() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(NotionErrorCode::HttpStatus(503).is_retryable());
        assert!(!NotionErrorCode::ValidationFailed.is_retryable());
        assert!(!NotionErrorCode::HttpStatus(400).is_retryable());
    }

    #[test]
    fn classifies_not_found() {
        assert!(NotionErrorCode::ObjectNotFound.is_not_found());
        assert!(NotionErrorCode::HttpStatus(404).is_not_found());
        assert!(!NotionErrorCode::Unauthorized.is_not_found());
    }

    #[test]
    fn service_error_exposes_code() {
        let err = AppError::NotionService {
            code: NotionErrorCode::RateLimited,
            message: "slow down".to_string(),
            status: 429,
        };
        assert_eq!(err.notion_code(), Some(&NotionErrorCode::RateLimited));
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Notion API returned an error (rate_limited): slow down"
        );

        let unimplemented = AppError::Unimplemented {
            operation: "append".to_string(),
        };
        assert_eq!(unimplemented.notion_code(), None);
        assert!(!unimplemented.is_retryable());
    }
}
