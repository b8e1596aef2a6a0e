//! Posttrack suite binary.
//!
//! Runs the whole scenario catalog sequentially against the live upstream
//! API and exits non-zero if any scenario fails.

use posttrack::{catalog, Fixtures};
use posttrack_application::{ApplicationError, ScenarioRunner};
use posttrack_infrastructure::ReqwestHttpClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let fixtures = Fixtures::from_env();
    let scenarios = catalog::catalog(&fixtures);
    let runner = ScenarioRunner::new(ReqwestHttpClient::new()?);

    tracing::info!(
        scenarios = scenarios.len(),
        base_url = %fixtures.base_url,
        "starting Posttrack suite v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut passed = 0_usize;
    let mut failed = 0_usize;
    let mut errored = 0_usize;

    for scenario in &scenarios {
        match runner.run(scenario).await {
            Ok(report) if report.all_passed() => passed += 1,
            Ok(report) => {
                failed += 1;
                for result in report.results.iter().filter(|r| !r.passed) {
                    tracing::warn!(
                        scenario = %report.scenario_name,
                        assertion = %result.assertion.description(),
                        actual = result.actual.as_deref().unwrap_or("<none>"),
                        error = result.error.as_deref().unwrap_or("<none>"),
                        "assertion failed"
                    );
                }
            }
            // Transport failures abort only the affected scenario.
            Err(ApplicationError::Transport(e)) => {
                errored += 1;
                tracing::error!(scenario = %scenario.name, error = %e, "transport failure");
            }
            Err(e) => {
                errored += 1;
                tracing::error!(scenario = %scenario.name, error = %e, "scenario rejected");
            }
        }
    }

    tracing::info!(passed, failed, errored, "suite finished");

    if failed > 0 || errored > 0 {
        std::process::exit(1);
    }
    Ok(())
}
