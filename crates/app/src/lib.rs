//! Posttrack - black-box contract suite for the Thailand Post tracking API
//!
//! The suite validates two upstream endpoints over HTTPS: token issuance
//! (`POST {base}/authenticate/token`) and shipment-status lookup
//! (`POST {base}/track`). Each scenario is one fully-determined request
//! paired with its expected status and JSON-shape assertions; the API under
//! test is an opaque external collaborator this repository does not own.

pub mod catalog;
pub mod fixtures;

pub use fixtures::Fixtures;
