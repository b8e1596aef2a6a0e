//! HTTP response snapshot.
//!
//! A [`ResponseSpec`] is captured once per scenario after the single HTTP
//! call; assertion evaluation is pure over this snapshot.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for the status codes the upstream
    /// API answers with.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            408 => "Request Timeout",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Everything received from one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Status text (e.g. "OK", "Forbidden").
    pub status_text: String,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body decoded as UTF-8 (lossy for binary payloads).
    pub body: String,
    /// Round-trip time for the call.
    pub duration: Duration,
    /// Content-Type header value, extracted for convenience.
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let status_code = status.into();
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        Self {
            status: status_code.as_u16(),
            status_text: status_code.reason_phrase().to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            duration,
            content_type,
        }
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code().is_success()
    }

    /// Attempts to parse the body as JSON.
    #[must_use]
    pub fn body_as_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_code_categories() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(401).is_client_error());
        assert!(StatusCode::new(403).is_client_error());
        assert!(StatusCode::new(503).is_server_error());
        assert!(!StatusCode::new(200).is_client_error());
    }

    #[test]
    fn status_code_display() {
        assert_eq!(StatusCode::new(200).to_string(), "200 OK");
        assert_eq!(StatusCode::new(401).to_string(), "401 Unauthorized");
        assert_eq!(StatusCode::new(403).to_string(), "403 Forbidden");
    }

    #[test]
    fn new_extracts_content_type() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = ResponseSpec::new(
            200,
            headers,
            br#"{"token":"t"}"#.to_vec(),
            Duration::from_millis(80),
        );

        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        assert_eq!(
            response.content_type.as_deref(),
            Some("application/json")
        );
        assert!(response.is_success());
    }

    #[test]
    fn body_as_json_round_trips() {
        let response = ResponseSpec::new(
            200,
            HashMap::new(),
            br#"{"message":"successful"}"#.to_vec(),
            Duration::ZERO,
        );

        let json = response.body_as_json();
        assert_eq!(
            json.and_then(|j| j.get("message").cloned()),
            Some(serde_json::json!("successful"))
        );
    }

    #[test]
    fn get_header_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Rate-Limit".to_string(), "250".to_string());
        let response = ResponseSpec::new(200, headers, vec![], Duration::ZERO);

        assert_eq!(response.get_header("x-rate-limit"), Some(&"250".to_string()));
        assert_eq!(response.get_header("missing"), None);
    }
}
