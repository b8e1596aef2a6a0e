//! Scenarios and their reports.
//!
//! A [`Scenario`] pairs one fully-determined request with its expected
//! outcome. Scenarios are independent of each other: no shared mutable
//! state, no ordering requirements.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assertion::{Assertion, AssertionResult, StatusExpectation};
use crate::error::{DomainError, DomainResult};
use crate::request::RequestSpec;

/// One request/expected-outcome pair, corresponding to a single test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Scenario name, e.g. "token: valid full token".
    pub name: String,
    /// The request to perform, exactly once.
    pub request: RequestSpec,
    /// Expectations evaluated against the response.
    #[serde(default)]
    pub expectations: Vec<Assertion>,
    /// Whether evaluation stops at the first failure. Accumulate-all is the
    /// default policy.
    #[serde(default)]
    pub stop_on_failure: bool,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl Scenario {
    /// Create a new scenario for a request.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            request,
            expectations: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// Add an expectation (builder pattern).
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.expectations.push(assertion);
        self
    }

    /// Add an exact-status expectation (builder pattern).
    #[must_use]
    pub fn expect_status(self, code: u16) -> Self {
        self.expect(Assertion::StatusCode {
            expected: StatusExpectation::exact(code),
        })
    }

    /// Validate the scenario: the request must be well-formed and at least
    /// one expectation must be present.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the request fails validation or the
    /// expectation list is empty.
    pub fn validate(&self) -> DomainResult<()> {
        self.request.validate()?;
        if self.expectations.is_empty() {
            return Err(DomainError::InvalidScenario(format!(
                "'{}' has no expectations",
                self.name
            )));
        }
        Ok(())
    }

    /// Get the number of expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Check if the scenario has no expectations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

/// Results from running one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario that was run.
    pub scenario_name: String,
    /// Individual assertion results, in evaluation order.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions evaluated.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Execution time in milliseconds, including the HTTP call.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Create a new report from assertion results.
    #[must_use]
    pub fn new(
        scenario_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            scenario_name: scenario_name.into(),
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if every assertion passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The first failing assertion in evaluation order, which surfaces as
    /// the headline failure reason.
    #[must_use]
    pub fn first_failure(&self) -> Option<&AssertionResult> {
        self.results.iter().find(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::StatusExpectation;
    use pretty_assertions::assert_eq;

    fn request() -> RequestSpec {
        RequestSpec::post("https://trackapi.thailandpost.co.th/post/api/v1/track")
    }

    #[test]
    fn builder_accumulates_expectations() {
        let scenario = Scenario::new("track: valid barcode", request())
            .expect_status(200)
            .expect(Assertion::JsonPath {
                path: "$.message".to_string(),
                expected: None,
            });

        assert_eq!(scenario.len(), 2);
        assert!(!scenario.stop_on_failure);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_expectations() {
        let scenario = Scenario::new("empty", request());
        assert!(matches!(
            scenario.validate(),
            Err(DomainError::InvalidScenario(_))
        ));
    }

    #[test]
    fn report_counts_failures() {
        let pass = AssertionResult::pass(Assertion::StatusCode {
            expected: StatusExpectation::exact(200),
        });
        let fail = AssertionResult::fail(
            Assertion::JsonPath {
                path: "$.token".to_string(),
                expected: None,
            },
            "JSON path '$.token' not found",
        );

        let report = ScenarioReport::new("token: valid full token", vec![pass, fail], 120);
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert_eq!(
            report.first_failure().and_then(|r| r.error.as_deref()),
            Some("JSON path '$.token' not found")
        );
    }
}
