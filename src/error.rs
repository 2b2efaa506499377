//! Error types for the Idswyft SDK

use thiserror::Error;

/// Errors that can occur when talking to the Idswyft API
///
/// Wire-classified variants map one-to-one onto HTTP status classes; exactly
/// one variant is produced per failed call, and no call produces more than one.
/// [`Config`](IdswyftError::Config) and [`InvalidFile`](IdswyftError::InvalidFile)
/// are caller-input errors raised before any network I/O, so callers can tell
/// "I used the SDK wrong" apart from "the service failed".
#[derive(Error, Debug)]
pub enum IdswyftError {
    /// Request rejected by server-side validation (HTTP 400)
    #[error("Validation failed: {message}")]
    Validation {
        /// Human-readable message from the server
        message: String,
        /// Offending field, when the server names one
        field: Option<String>,
        /// Individual field-level errors
        validation_errors: Vec<String>,
    },

    /// API key missing, malformed, or revoked (HTTP 401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Requested resource does not exist (HTTP 404)
    #[error("{resource} not found")]
    NotFound {
        /// Name of the missing resource
        resource: String,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Human-readable message from the server
        message: String,
        /// Seconds to wait before retrying, when the server provides one
        retry_after: Option<u64>,
    },

    /// Server-side failure (HTTP 5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Transport-level failure: timeout, connection refused, DNS, body read
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-2xx response
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Human-readable message from the server
        message: String,
        /// Machine-readable error code, when present
        code: Option<String>,
        /// Structured detail payload, when present
        details: Option<serde_json::Value>,
    },

    /// Client misconfiguration detected before any request was made
    #[error("Configuration error: {0}")]
    Config(String),

    /// File payload could not be read
    #[error("Invalid file input: {0}")]
    InvalidFile(String),

    /// Successful response body did not match the declared shape
    #[error("Response decode error: {0}")]
    Decode(String),
}

impl IdswyftError {
    /// HTTP status carried by this error, if it originated from a response
    ///
    /// Network and caller-input errors have none.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Validation { .. } => Some(400),
            Self::Authentication(_) => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Server(_) => Some(500),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-readable error code for this error kind
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Validation { .. } => Some("validation_failed"),
            Self::Authentication(_) => Some("authentication_failed"),
            Self::NotFound { .. } => Some("not_found"),
            Self::RateLimit { .. } => Some("rate_limit_exceeded"),
            Self::Server(_) => Some("server_error"),
            Self::Network(_) => Some("network_error"),
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True when the error was raised locally, before any network I/O
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidFile(_))
    }
}

impl From<reqwest::Error> for IdswyftError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IdswyftError::Network(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            IdswyftError::Network(format!("Failed to connect to Idswyft API: {err}"))
        } else {
            IdswyftError::Network(format!("Network error: {err}"))
        }
    }
}

impl From<serde_json::Error> for IdswyftError {
    fn from(err: serde_json::Error) -> Self {
        IdswyftError::Decode(err.to_string())
    }
}

/// Result type for Idswyft SDK operations
pub type Result<T> = std::result::Result<T, IdswyftError>;
