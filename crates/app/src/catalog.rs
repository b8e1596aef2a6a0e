//! The scenario catalog.
//!
//! Every scenario pairs one request with literal expectations. The two
//! endpoints answer auth failures differently - 401 on token issuance, 403
//! on tracking lookup - and the catalog keeps that split as observed
//! upstream. Likewise the body-validation asymmetry: empty or missing
//! `status`/`language`/`barcode` come back as HTTP 200 with a structured
//! message, but `barcode` sent as a bare empty string is an HTTP 400.

use posttrack_domain::{Assertion, ComparisonOperator, JsonType, RequestSpec, Scenario};
use serde_json::json;

use crate::fixtures::Fixtures;

/// TrackingRecord fields that are always strings.
const RECORD_STRING_FIELDS: [&str; 5] = [
    "barcode",
    "status",
    "status_description",
    "status_date",
    "location",
];

/// TrackingRecord fields that are either exactly null or a string.
const RECORD_NULLABLE_FIELDS: [&str; 6] = [
    "delivery_status",
    "delivery_description",
    "postcode",
    "delivery_datetime",
    "receiver_name",
    "signature",
];

/// Builds the full catalog: token issuance first, then tracking lookup.
#[must_use]
pub fn catalog(fixtures: &Fixtures) -> Vec<Scenario> {
    let mut scenarios = token_scenarios(fixtures);
    scenarios.extend(tracking_scenarios(fixtures));
    scenarios
}

/// Scenarios against `POST {base}/authenticate/token`.
#[must_use]
pub fn token_scenarios(fixtures: &Fixtures) -> Vec<Scenario> {
    let url = fixtures.token_url();

    vec![
        Scenario::new(
            "token: valid full token",
            RequestSpec::post(&url).with_token(&fixtures.valid_token),
        )
        .expect_status(200)
        .expect(json_exists("$.token"))
        .expect(json_exists("$.expire")),
        Scenario::new(
            "token: invalid token",
            RequestSpec::post(&url).with_token(&fixtures.invalid_token),
        )
        .expect_status(401),
        Scenario::new("token: authorization omitted", RequestSpec::post(&url)).expect_status(401),
        Scenario::new(
            "token: authorization empty",
            RequestSpec::post(&url).with_header("authorization", ""),
        )
        .expect_status(401),
        // Bare token value, no "Token " prefix, and truncated.
        Scenario::new(
            "token: malformed authorization",
            RequestSpec::post(&url).with_header("authorization", &fixtures.incomplete_token),
        )
        .expect_status(401),
        Scenario::new(
            "token: malformed body",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({ "username": "username" })),
        )
        .expect_status(400),
        // The endpoint treats an omitted content-type and an empty one as
        // the default; both still issue a token.
        Scenario::new(
            "token: content-type omitted",
            RequestSpec::post(&url).with_token(&fixtures.valid_token),
        )
        .expect_status(200)
        .expect(json_exists("$.token")),
        Scenario::new(
            "token: content-type empty",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_header("content-type", ""),
        )
        .expect_status(200)
        .expect(json_exists("$.token")),
    ]
}

/// Scenarios against `POST {base}/track`.
#[must_use]
pub fn tracking_scenarios(fixtures: &Fixtures) -> Vec<Scenario> {
    let url = fixtures.track_url();
    let lookup = |barcode: &str| json!({ "status": "all", "language": "TH", "barcode": [barcode] });

    let mut scenarios = vec![
        Scenario::new(
            "track: authorization omitted",
            RequestSpec::post(&url).with_json_body(lookup(&fixtures.valid_barcode)),
        )
        .expect_status(403),
        Scenario::new(
            "track: authorization empty",
            RequestSpec::post(&url)
                .with_header("authorization", "")
                .with_json_body(lookup(&fixtures.valid_barcode)),
        )
        .expect_status(403),
        Scenario::new(
            "track: malformed authorization",
            RequestSpec::post(&url)
                .with_header("authorization", &fixtures.incomplete_token)
                .with_json_body(lookup(&fixtures.valid_barcode)),
        )
        .expect_status(403),
    ];

    let mut valid_lookup = Scenario::new(
        "track: valid barcode",
        RequestSpec::post(&url)
            .with_token(&fixtures.valid_token)
            .with_json_body(lookup(&fixtures.valid_barcode)),
    )
    .expect_status(200)
    .expect(Assertion::JsonPathCount {
        path: items_path(&fixtures.valid_barcode),
        operator: ComparisonOperator::GreaterThan,
        count: 0,
    });
    for field in RECORD_STRING_FIELDS {
        valid_lookup = valid_lookup.expect(Assertion::JsonPathType {
            path: record_path(&fixtures.valid_barcode, field),
            expected: JsonType::String,
        });
    }
    for field in RECORD_NULLABLE_FIELDS {
        valid_lookup = valid_lookup.expect(Assertion::JsonPathNullOrType {
            path: record_path(&fixtures.valid_barcode, field),
            expected: JsonType::String,
        });
    }
    valid_lookup = valid_lookup
        .expect(Assertion::JsonPathType {
            path: "$.response.track_count.track_date".to_string(),
            expected: JsonType::String,
        })
        .expect(Assertion::JsonPathType {
            path: "$.response.track_count.count_number".to_string(),
            expected: JsonType::Number,
        })
        .expect(Assertion::JsonPathType {
            path: "$.response.track_count.track_count_limit".to_string(),
            expected: JsonType::Number,
        });
    scenarios.push(valid_lookup);

    scenarios.extend([
        // Unknown tracking numbers are not an error: the key is present
        // with an empty list.
        Scenario::new(
            "track: unknown barcode",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(lookup(&fixtures.unknown_barcode)),
        )
        .expect_status(200)
        .expect(Assertion::JsonPathCount {
            path: items_path(&fixtures.unknown_barcode),
            operator: ComparisonOperator::Equals,
            count: 0,
        }),
        // An unsupported language silently falls back to English.
        Scenario::new(
            "track: unsupported language defaults to english",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({
                    "status": "all",
                    "language": "XX",
                    "barcode": [&fixtures.valid_barcode],
                })),
        )
        .expect_status(200)
        .expect(Assertion::JsonPathCount {
            path: items_path(&fixtures.valid_barcode),
            operator: ComparisonOperator::GreaterThan,
            count: 0,
        }),
        Scenario::new(
            "track: empty status",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({
                    "status": "",
                    "language": "TH",
                    "barcode": [&fixtures.valid_barcode],
                })),
        )
        .expect_status(200)
        .expect(message_equals("invalid status")),
        Scenario::new(
            "track: status omitted",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({
                    "language": "TH",
                    "barcode": [&fixtures.valid_barcode],
                })),
        )
        .expect_status(200)
        .expect(message_equals("value cannot be null or empty")),
        Scenario::new(
            "track: empty language",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({
                    "status": "all",
                    "language": "",
                    "barcode": [&fixtures.valid_barcode],
                })),
        )
        .expect_status(200)
        .expect(message_equals("value cannot be null or empty")),
        Scenario::new(
            "track: barcode omitted",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({ "status": "all", "language": "TH" })),
        )
        .expect_status(200)
        .expect(message_equals("value cannot be null or empty")),
        // Asymmetric with the other empty-field cases and kept that way.
        Scenario::new(
            "track: empty string barcode",
            RequestSpec::post(&url)
                .with_token(&fixtures.valid_token)
                .with_json_body(json!({
                    "status": "all",
                    "language": "TH",
                    "barcode": "",
                })),
        )
        .expect_status(400),
    ]);

    scenarios
}

fn json_exists(path: &str) -> Assertion {
    Assertion::JsonPath {
        path: path.to_string(),
        expected: None,
    }
}

fn message_equals(message: &str) -> Assertion {
    Assertion::JsonPath {
        path: "$.message".to_string(),
        expected: Some(json!(message)),
    }
}

fn items_path(barcode: &str) -> String {
    format!("$.response.items.{barcode}")
}

fn record_path(barcode: &str, field: &str) -> String {
    format!("$.response.items.{barcode}[*].{field}")
}
