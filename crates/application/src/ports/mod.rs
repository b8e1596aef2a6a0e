//! Port definitions (interfaces)
//!
//! Ports define the boundary between the application core and external
//! systems. The only external system here is the HTTP transport.

mod http_client;

pub use http_client::{HttpClient, HttpClientError};
