//! Scenario execution.
//!
//! The [`ScenarioRunner`] performs exactly one HTTP request per scenario
//! through the [`HttpClient`] port, then hands the captured response to the
//! [`AssertionRunner`]. A transport failure surfaces as an error for that
//! scenario, distinct from assertion failures inside the report.

mod eval;

pub use eval::{query_json_path, AssertionRunner};

use posttrack_domain::{Scenario, ScenarioReport};

use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Runs scenarios end to end: request, capture, evaluate.
pub struct ScenarioRunner<C> {
    client: C,
    assertions: AssertionRunner,
}

impl<C: HttpClient> ScenarioRunner<C> {
    /// Create a runner over the given HTTP client.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self {
            client,
            assertions: AssertionRunner::new(),
        }
    }

    /// Set whether evaluation stops at the first failing assertion.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.assertions = AssertionRunner::new().with_stop_on_failure(stop);
        self
    }

    /// Run one scenario: validate, perform the single HTTP call, evaluate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::Domain`] for an invalid scenario
    /// and [`crate::ApplicationError::Transport`] when the HTTP call itself
    /// fails (timeout, DNS, connection refused). Non-2xx statuses are not
    /// errors; scenarios assert on them.
    pub async fn run(&self, scenario: &Scenario) -> ApplicationResult<ScenarioReport> {
        scenario.validate()?;

        tracing::debug!(
            scenario = %scenario.name,
            method = %scenario.request.method,
            url = %scenario.request.url,
            "executing scenario request"
        );

        let response = self.client.execute(&scenario.request).await?;

        tracing::debug!(
            scenario = %scenario.name,
            status = response.status,
            duration_ms = response.duration.as_millis() as u64,
            "response captured"
        );

        let report = self.assertions.run(scenario, &response);
        if report.all_passed() {
            tracing::info!(
                scenario = %scenario.name,
                passed = report.passed,
                "scenario passed"
            );
        } else {
            let reason = report
                .first_failure()
                .and_then(|r| r.error.clone())
                .unwrap_or_default();
            tracing::warn!(
                scenario = %scenario.name,
                failed = report.failed,
                reason = %reason,
                "scenario failed"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::HttpClientError;
    use posttrack_domain::{RequestSpec, ResponseSpec};
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    struct CannedClient {
        response: Result<ResponseSpec, HttpClientError>,
    }

    impl HttpClient for CannedClient {
        fn execute(
            &self,
            _request: &RequestSpec,
        ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>
        {
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn token_ok_response() -> ResponseSpec {
        ResponseSpec::new(
            200,
            HashMap::new(),
            br#"{"token":"eyJ0eXAi","expire":"2026-08-29 13:00:00+07:00"}"#.to_vec(),
            Duration::from_millis(90),
        )
    }

    fn token_scenario() -> Scenario {
        Scenario::new(
            "token: valid full token",
            RequestSpec::post("https://trackapi.thailandpost.co.th/post/api/v1/authenticate/token")
                .with_token("abc"),
        )
        .expect_status(200)
        .expect(posttrack_domain::Assertion::JsonPath {
            path: "$.token".to_string(),
            expected: None,
        })
        .expect(posttrack_domain::Assertion::JsonPath {
            path: "$.expire".to_string(),
            expected: None,
        })
    }

    #[tokio::test]
    async fn run_reports_passing_scenario() {
        let runner = ScenarioRunner::new(CannedClient {
            response: Ok(token_ok_response()),
        });

        let report = runner.run(&token_scenario()).await.unwrap();
        assert!(report.all_passed());
        assert_eq!(report.total, 3);
    }

    #[tokio::test]
    async fn transport_failure_is_an_error_not_a_report() {
        let runner = ScenarioRunner::new(CannedClient {
            response: Err(HttpClientError::Timeout { timeout_ms: 30_000 }),
        });

        let result = runner.run(&token_scenario()).await;
        assert!(matches!(
            result,
            Err(crate::ApplicationError::Transport(
                HttpClientError::Timeout { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn invalid_scenario_is_rejected_before_any_call() {
        let runner = ScenarioRunner::new(CannedClient {
            response: Ok(token_ok_response()),
        });

        let scenario = Scenario::new(
            "no expectations",
            RequestSpec::post("https://trackapi.thailandpost.co.th/post/api/v1/track"),
        );
        let result = runner.run(&scenario).await;
        assert!(matches!(
            result,
            Err(crate::ApplicationError::Domain(_))
        ));
    }
}
