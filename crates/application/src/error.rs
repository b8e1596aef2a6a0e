//! Application error types

use posttrack_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
///
/// A transport failure is a runner-level fatal error for its scenario and
/// is reported distinctly from an assertion failure, which lives inside a
/// `ScenarioReport`.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The HTTP call itself failed (timeout, DNS, connection refused).
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
