//! Shared HTTP plumbing for the provider adapters

use super::credentials::Credentials;
use council_application::ProviderError;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connection-level limit for one request; the orchestrator applies the
/// per-provider deadline on top of this.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(300);

/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Construction parameters common to every HTTP adapter
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Display name stamped on outcomes
    pub name: String,
    pub model: String,
    pub credentials: Credentials,
    /// API root without a trailing slash
    pub base_url: String,
    /// Confidence reported with every answer
    pub confidence: f64,
    pub timeout: Duration,
}

impl HttpProviderConfig {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            credentials: Credentials::none(),
            base_url: trim_base_url(base_url.into()),
            confidence,
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API key, or `Unavailable` when none was resolved
    pub fn require_key(&self) -> Result<&str, ProviderError> {
        self.credentials
            .api_key()
            .ok_or_else(|| ProviderError::Unavailable(format!("{}: no API key configured", self.name)))
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Build a client with JSON content type and the given extra headers
pub fn build_client(
    timeout: Duration,
    extra_headers: HeaderMap,
) -> Result<reqwest::Client, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(extra_headers);

    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| ProviderError::Other(format!("Failed to create HTTP client: {e}")))
}

/// Header value from a secret, rejecting control characters
pub fn header_value(value: &str) -> Result<HeaderValue, ProviderError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| ProviderError::Authentication("invalid API key format".to_string()))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Map a transport-level failure
pub fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Request(err.to_string())
    }
}

/// Check the status and decode the JSON body of a response
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }

    let body = response.text().await.map_err(map_transport_error)?;
    serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// Error for a non-2xx response
pub fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Authentication(format!("HTTP {}: {}", status.as_u16(), message))
        }
        _ => ProviderError::Request(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

/// Pull `error.message` (or a string `error`) out of a JSON error body,
/// falling back to the raw text.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        v.pointer("/error/message")
            .or_else(|| v.get("message"))
            .or_else(|| v.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    });

    let text = message.unwrap_or_else(|| body.trim().to_string());
    if text.is_empty() {
        return "no response body".to_string();
    }
    council_domain::core::string::truncate_with_ellipsis(&text, MAX_ERROR_BODY)
}
