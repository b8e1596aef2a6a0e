//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name contains characters that cannot go on the wire.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A JSON path expression is malformed.
    #[error("invalid JSON path: {0}")]
    InvalidJsonPath(String),

    /// A scenario is structurally invalid (e.g. no expectations).
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
