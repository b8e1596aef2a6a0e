//! Posttrack Domain - Core suite types
//!
//! This crate defines the domain model for the Posttrack contract suite:
//! request descriptors, response snapshots, scenarios and assertions.
//! All types here are pure Rust with no I/O dependencies.

pub mod assertion;
pub mod error;
pub mod request;
pub mod response;
pub mod scenario;

pub use assertion::{
    is_null_or_type, Assertion, AssertionResult, ComparisonOperator, JsonType, StatusExpectation,
};
pub use error::{DomainError, DomainResult};
pub use request::{Header, HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use scenario::{Scenario, ScenarioReport};
