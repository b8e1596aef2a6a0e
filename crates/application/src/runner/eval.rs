//! Assertion evaluation.
//!
//! Evaluates expectations against a captured `ResponseSpec`. Evaluation is
//! pure: the response snapshot is never re-fetched.

use std::time::Instant;

use posttrack_domain::{
    is_null_or_type, Assertion, AssertionResult, ComparisonOperator, JsonType, ResponseSpec,
    Scenario, ScenarioReport, StatusExpectation,
};

/// Evaluates a scenario's expectations against a response.
///
/// Accumulate-all is the default policy: every assertion is checked and
/// reported, and the first failure in evaluation order is the headline
/// reason. `stop_on_failure` (on the runner or the scenario) short-circuits
/// instead.
#[derive(Debug, Default)]
pub struct AssertionRunner {
    /// Whether to stop on first failure.
    stop_on_failure: bool,
}

impl AssertionRunner {
    /// Create a new assertion runner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Set whether to stop on first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Run all of a scenario's expectations against a response.
    ///
    /// The report duration includes the HTTP round-trip captured in the
    /// response plus evaluation time.
    #[must_use]
    pub fn run(&self, scenario: &Scenario, response: &ResponseSpec) -> ScenarioReport {
        let start = Instant::now();
        let mut results = Vec::with_capacity(scenario.expectations.len());

        for assertion in &scenario.expectations {
            let result = self.run_assertion(assertion, response);
            let failed = !result.passed;
            results.push(result);

            if failed && (self.stop_on_failure || scenario.stop_on_failure) {
                break;
            }
        }

        let duration_ms = (response.duration + start.elapsed()).as_millis() as u64;
        ScenarioReport::new(&scenario.name, results, duration_ms)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => check_status_code(assertion, response, expected),
            Assertion::JsonPath { path, expected } => {
                check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::JsonPathType { path, expected } => {
                check_json_type(assertion, response, path, *expected, false)
            }
            Assertion::JsonPathNullOrType { path, expected } => {
                check_json_type(assertion, response, path, *expected, true)
            }
            Assertion::JsonPathCount {
                path,
                operator,
                count,
            } => check_json_count(assertion, response, path, *operator, *count),
        }
    }
}

fn check_status_code(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &StatusExpectation,
) -> AssertionResult {
    let actual = response.status;
    if expected.matches(actual) {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!("Expected status {}, got {}", expected.description(), actual),
        )
    }
}

/// Parse the response body as JSON, or produce the failure result.
fn parse_body(
    assertion: &Assertion,
    response: &ResponseSpec,
) -> Result<serde_json::Value, AssertionResult> {
    serde_json::from_str(&response.body).map_err(|e| {
        AssertionResult::fail(
            assertion.clone(),
            format!("Failed to parse body as JSON: {e}"),
        )
    })
}

/// Query matches for a path, or produce the failure result for a malformed
/// path or an unmatched one.
fn matches_at_path(
    assertion: &Assertion,
    json: &serde_json::Value,
    path: &str,
) -> Result<Vec<serde_json::Value>, AssertionResult> {
    match query_json_path(json, path) {
        Ok(matches) if matches.is_empty() => Err(AssertionResult::fail(
            assertion.clone(),
            format!("JSON path '{path}' not found"),
        )),
        Ok(matches) => Ok(matches),
        Err(e) => Err(AssertionResult::fail(
            assertion.clone(),
            format!("Invalid JSON path '{path}': {e}"),
        )),
    }
}

fn check_json_path(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    expected: Option<&serde_json::Value>,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(result) => return result,
    };
    let matches = match matches_at_path(assertion, &json, path) {
        Ok(matches) => matches,
        Err(result) => return result,
    };

    if let Some(expected_value) = expected {
        for value in &matches {
            if value != expected_value {
                return AssertionResult::fail_with_value(
                    assertion.clone(),
                    value.to_string(),
                    format!("JSON path '{path}' value mismatch: expected {expected_value}, got {value}"),
                );
            }
        }
    }
    AssertionResult::pass_with_value(assertion.clone(), matches[0].to_string())
}

fn check_json_type(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    expected: JsonType,
    accept_null: bool,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(result) => return result,
    };
    let matches = match matches_at_path(assertion, &json, path) {
        Ok(matches) => matches,
        Err(result) => return result,
    };

    for value in &matches {
        let ok = if accept_null {
            is_null_or_type(value, expected)
        } else {
            expected.matches(value)
        };
        if !ok {
            let wanted = if accept_null {
                format!("null or {}", expected.as_str())
            } else {
                expected.as_str().to_string()
            };
            return AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!(
                    "JSON path '{path}' expected {wanted}, got {}",
                    json_type_name(value)
                ),
            );
        }
    }
    AssertionResult::pass_with_value(assertion.clone(), format!("{} match(es)", matches.len()))
}

fn check_json_count(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    operator: ComparisonOperator,
    count: usize,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(result) => return result,
    };
    let matches = match matches_at_path(assertion, &json, path) {
        Ok(matches) => matches,
        Err(result) => return result,
    };

    for value in &matches {
        let Some(array) = value.as_array() else {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!(
                    "JSON path '{path}' expected an array, got {}",
                    json_type_name(value)
                ),
            );
        };
        if !operator.compare(array.len(), count) {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                array.len().to_string(),
                format!(
                    "JSON path '{path}' length {} does not satisfy {} {count}",
                    array.len(),
                    operator.symbol()
                ),
            );
        }
    }
    AssertionResult::pass_with_value(assertion.clone(), matches[0].to_string())
}

/// JSON type name for error messages.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Query all values matched by a simple JSONPath-like expression.
///
/// Supports `$.field`, `$.field.nested`, `$.array[0]` and `$.array[*]`.
/// A `[*]` segment fans the remaining path out over every array element, so
/// a path like `$.items[*].barcode` yields one value per item. An empty
/// result means the path matched nothing.
pub fn query_json_path(
    json: &serde_json::Value,
    path: &str,
) -> Result<Vec<serde_json::Value>, String> {
    let path = path.trim();
    let Some(path) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    if path.is_empty() {
        return Ok(vec![json.clone()]);
    }

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = vec![json.clone()];

    for segment in split_path_segments(path) {
        let mut next = Vec::new();

        if let Some((name, index)) = parse_array_access(&segment) {
            let idx = if index == "*" {
                None
            } else {
                Some(
                    index
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid array index: {index}"))?,
                )
            };

            for value in &current {
                let target = if name.is_empty() {
                    Some(value)
                } else {
                    value.get(&name)
                };
                let Some(target) = target else { continue };

                match idx {
                    None => {
                        if let Some(elements) = target.as_array() {
                            next.extend(elements.iter().cloned());
                        }
                    }
                    Some(i) => {
                        if let Some(element) = target.get(i) {
                            next.push(element.clone());
                        }
                    }
                }
            }
        } else {
            for value in &current {
                if let Some(child) = value.get(&segment) {
                    next.push(child.clone());
                }
            }
        }

        current = next;
        if current.is_empty() {
            break;
        }
    }

    Ok(current)
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like `field[0]` into `("field", "0")`.
fn parse_array_access(segment: &str) -> Option<(String, String)> {
    let bracket_start = segment.find('[')?;
    if !segment.ends_with(']') {
        return None;
    }
    let name = segment[..bracket_start].to_string();
    let index = segment[bracket_start + 1..segment.len() - 1].to_string();
    Some((name, index))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use posttrack_domain::RequestSpec;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSpec::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::from_millis(50),
        )
    }

    #[test]
    fn status_code_exact() {
        let runner = AssertionRunner::new();
        let resp = response(401, "{}");

        let assertion = Assertion::StatusCode {
            expected: StatusExpectation::exact(401),
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::StatusCode {
            expected: StatusExpectation::exact(403),
        };
        assert!(!runner.run_assertion(&assertion, &resp).passed);
    }

    #[test]
    fn json_path_presence_and_value() {
        let runner = AssertionRunner::new();
        let resp = response(200, r#"{"token":"abc","expire":"2026-08-29 12:00:00+07:00"}"#);

        let assertion = Assertion::JsonPath {
            path: "$.token".to_string(),
            expected: None,
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::JsonPath {
            path: "$.expire".to_string(),
            expected: None,
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::JsonPath {
            path: "$.message".to_string(),
            expected: None,
        };
        assert!(!runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::JsonPath {
            path: "$.token".to_string(),
            expected: Some(json!("abc")),
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::JsonPath {
            path: "$.token".to_string(),
            expected: Some(json!("other")),
        };
        assert!(!runner.run_assertion(&assertion, &resp).passed);
    }

    #[test]
    fn json_path_rejects_non_json_body() {
        let runner = AssertionRunner::new();
        let resp = response(200, "not json");

        let assertion = Assertion::JsonPath {
            path: "$.token".to_string(),
            expected: None,
        };
        let result = runner.run_assertion(&assertion, &resp);
        assert!(!result.passed);
        assert!(result.error.unwrap().contains("parse body as JSON"));
    }

    #[test]
    fn json_type_check() {
        let runner = AssertionRunner::new();
        let resp = response(200, r#"{"count_number":3,"track_date":"29/08/2569"}"#);

        let assertion = Assertion::JsonPathType {
            path: "$.count_number".to_string(),
            expected: JsonType::Number,
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::JsonPathType {
            path: "$.track_date".to_string(),
            expected: JsonType::Number,
        };
        assert!(!runner.run_assertion(&assertion, &resp).passed);
    }

    #[test]
    fn null_or_type_over_wildcard() {
        let runner = AssertionRunner::new();
        let resp = response(
            200,
            r#"{"items":[{"signature":null},{"signature":"somchai"}]}"#,
        );

        let assertion = Assertion::JsonPathNullOrType {
            path: "$.items[*].signature".to_string(),
            expected: JsonType::String,
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let resp = response(200, r#"{"items":[{"signature":17}]}"#);
        let result = runner.run_assertion(&assertion, &resp);
        assert!(!result.passed);
        assert!(result.error.unwrap().contains("null or string"));
    }

    #[test]
    fn wildcard_requires_at_least_one_match() {
        let runner = AssertionRunner::new();
        let resp = response(200, r#"{"items":[]}"#);

        let assertion = Assertion::JsonPathType {
            path: "$.items[*].barcode".to_string(),
            expected: JsonType::String,
        };
        let result = runner.run_assertion(&assertion, &resp);
        assert!(!result.passed);
        assert!(result.error.unwrap().contains("not found"));
    }

    #[test]
    fn count_equals_zero_for_empty_array() {
        let runner = AssertionRunner::new();
        let resp = response(200, r#"{"response":{"items":{"RX999999999XX":[]}}}"#);

        let assertion = Assertion::JsonPathCount {
            path: "$.response.items.RX999999999XX".to_string(),
            operator: ComparisonOperator::Equals,
            count: 0,
        };
        assert!(runner.run_assertion(&assertion, &resp).passed);

        let assertion = Assertion::JsonPathCount {
            path: "$.response.items.RX999999999XX".to_string(),
            operator: ComparisonOperator::GreaterThan,
            count: 0,
        };
        assert!(!runner.run_assertion(&assertion, &resp).passed);
    }

    #[test]
    fn count_rejects_non_array() {
        let runner = AssertionRunner::new();
        let resp = response(200, r#"{"items":"none"}"#);

        let assertion = Assertion::JsonPathCount {
            path: "$.items".to_string(),
            operator: ComparisonOperator::Equals,
            count: 0,
        };
        let result = runner.run_assertion(&assertion, &resp);
        assert!(!result.passed);
        assert!(result.error.unwrap().contains("expected an array"));
    }

    #[test]
    fn query_path_segments() {
        let json = json!({"response": {"items": {"EY145587896TH": [{"barcode": "EY145587896TH"}]}}});

        let matches =
            query_json_path(&json, "$.response.items.EY145587896TH[0].barcode").unwrap();
        assert_eq!(matches, vec![json!("EY145587896TH")]);

        let matches = query_json_path(&json, "$.response.items.EY145587896TH[*].barcode").unwrap();
        assert_eq!(matches.len(), 1);

        let matches = query_json_path(&json, "$.response.missing").unwrap();
        assert!(matches.is_empty());

        assert!(query_json_path(&json, "response.items").is_err());
        assert!(query_json_path(&json, "$.items[x]").is_err());
    }

    #[test]
    fn accumulate_all_reports_every_failure() {
        let runner = AssertionRunner::new();
        let resp = response(404, r#"{"status":false}"#);

        let scenario = Scenario::new(
            "failing",
            RequestSpec::post("https://trackapi.thailandpost.co.th/post/api/v1/track"),
        )
        .expect_status(200)
        .expect(Assertion::JsonPath {
            path: "$.message".to_string(),
            expected: None,
        });

        let report = runner.run(&scenario, &resp);
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 2);
        assert!(report.first_failure().is_some());
    }

    #[test]
    fn stop_on_failure_short_circuits() {
        let runner = AssertionRunner::new().with_stop_on_failure(true);
        let resp = response(404, "{}");

        let scenario = Scenario::new(
            "failing",
            RequestSpec::post("https://trackapi.thailandpost.co.th/post/api/v1/track"),
        )
        .expect_status(200)
        .expect(Assertion::JsonPath {
            path: "$.message".to_string(),
            expected: None,
        });

        let report = runner.run(&scenario, &resp);
        assert_eq!(report.results.len(), 1);
    }
}
