//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. It sends exactly the
//! headers a scenario specifies: an absent header stays off the wire, an
//! empty header goes out with an empty value, and `Content-Type` is only
//! defaulted when a JSON body is present and the scenario did not pin the
//! header itself. Non-2xx statuses are returned as data, never mapped to
//! errors, because many scenarios expect them.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use posttrack_application::ports::{HttpClient, HttpClientError};
use posttrack_domain::{HttpMethod, RequestSpec, ResponseSpec};
use reqwest::{Client, Method, Url};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("Posttrack/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration: rustls TLS verification, redirects limited
    /// to 10, shared connection pool across scenarios.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client wrapping a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Returns true when the adapter should add `Content-Type:
    /// application/json` itself: the request carries a JSON body and the
    /// scenario did not pin the header (even to an empty value).
    fn needs_default_content_type(request: &RequestSpec) -> bool {
        request.body.is_some() && !request.has_header("content-type")
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string();
            if message.to_lowercase().contains("dns") || message.to_lowercase().contains("resolve")
            {
                return HttpClientError::DnsError { host, message };
            }
            if message.to_lowercase().contains("refused") {
                let port = error
                    .url()
                    .and_then(Url::port_or_known_default)
                    .unwrap_or(443);
                return HttpClientError::ConnectionRefused { host, port };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        let method = request.method;
        let url = request.url.clone();
        let headers = request.headers.clone();
        let body = request.body.clone();
        let timeout_ms = request.timeout_ms;
        let add_content_type = Self::needs_default_content_type(request);

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url)
                .timeout(Duration::from_millis(timeout_ms));

            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }
            if add_content_type {
                builder = builder.header("Content-Type", "application/json");
            }

            if let Some(body) = &body {
                let content = serde_json::to_string(body)
                    .map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;
                builder = builder.body(content);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            tracing::debug!(status, bytes = body_bytes.len(), "request completed");

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                duration,
            ))
        })
    }
}
