//! Posttrack Infrastructure - Transport adapters
//!
//! Implements the application's `HttpClient` port with reqwest.

pub mod adapters;

pub use adapters::ReqwestHttpClient;
