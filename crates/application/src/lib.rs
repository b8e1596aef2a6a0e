//! Posttrack Application - Ports and the scenario runner
//!
//! This crate defines the boundary to the HTTP transport (the `HttpClient`
//! port) and the runner that executes a scenario: one HTTP call, then
//! assertion evaluation over the captured response.

pub mod error;
pub mod ports;
pub mod runner;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError};
pub use runner::{AssertionRunner, ScenarioRunner};
