//! HTTP client port.

use std::future::Future;
use std::pin::Pin;

use posttrack_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Errors the HTTP transport can produce.
///
/// Non-2xx statuses are not errors: they come back as ordinary
/// `ResponseSpec` data, because many scenarios expect them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// DNS resolution failed.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that could not be resolved.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The remote host refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Remote host.
        host: String,
        /// Remote port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport failure.
    #[error("HTTP client error: {0}")]
    Other(String),
}

/// Port for executing a single HTTP request.
///
/// Implementations perform exactly one request per call: no retries, no
/// response-dependent branching.
pub trait HttpClient: Send + Sync {
    /// Execute the request and capture the response.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>;
}
