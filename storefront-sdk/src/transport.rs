//! Transport response contract
//!
//! The normalizer never looks at a concrete HTTP library type. Anything that
//! can report a status, look up headers and hand over its body satisfies
//! [`TransportResponse`]; the SDK ships implementations for
//! [`reqwest::Response`] and for the in-memory [`StaticResponse`].

use crate::error::{SdkError, SdkResult};
use async_trait::async_trait;

/// A raw HTTP response before any domain interpretation.
///
/// Body reads consume the response, so a caller that wants to normalize the
/// same response twice has to clone it first (see [`StaticResponse`]).
#[async_trait]
pub trait TransportResponse: Send + Sized {
    /// Whether the status is in the success range (2xx)
    fn is_success(&self) -> bool;

    /// Numeric status code
    fn status(&self) -> u16;

    /// Reason phrase for the status, empty when the transport has none
    fn status_text(&self) -> &str;

    /// Case-insensitive header lookup
    fn header(&self, name: &str) -> Option<&str>;

    /// Read the whole body as text
    async fn text(self) -> SdkResult<String>;

    /// Read the whole body as JSON. An empty body reads as `null`.
    async fn json(self) -> SdkResult<serde_json::Value> {
        let text = self.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(SdkError::SerializationError)
    }
}

#[async_trait]
impl TransportResponse for reqwest::Response {
    fn is_success(&self) -> bool {
        reqwest::Response::status(self).is_success()
    }

    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    /// The canonical reason phrase for the status code. reqwest does not
    /// surface a custom phrase sent by the server.
    fn status_text(&self) -> &str {
        reqwest::Response::status(self)
            .canonical_reason()
            .unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// A body that outlives the client timeout surfaces as a network error
    /// here; `HttpClient` re-tags it as [`SdkError::Timeout`].
    async fn text(self) -> SdkResult<String> {
        reqwest::Response::text(self)
            .await
            .map_err(SdkError::NetworkError)
    }
}

/// A fully buffered response held in memory.
///
/// Useful for tests and for callers that already hold the status, headers
/// and body from some other transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticResponse {
    status: u16,
    status_text: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl StaticResponse {
    /// Create an empty-bodied response with the given status
    pub fn new(status: u16) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Create a response whose body is the serialized JSON value
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(body.to_string())
    }

    /// Set the reason phrase
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the raw body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

#[async_trait]
impl TransportResponse for StaticResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    async fn text(self) -> SdkResult<String> {
        Ok(self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_response_success_range() {
        assert!(StaticResponse::new(200).is_success());
        assert!(StaticResponse::new(204).is_success());
        assert!(!StaticResponse::new(199).is_success());
        assert!(!StaticResponse::new(301).is_success());
        assert!(!StaticResponse::new(404).is_success());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = StaticResponse::new(200).with_header("X-Total-Count", "7");

        assert_eq!(response.header("x-total-count"), Some("7"));
        assert_eq!(response.header("X-TOTAL-COUNT"), Some("7"));
        assert_eq!(response.header("X-Other"), None);
    }

    #[tokio::test]
    async fn test_json_body() {
        let response = StaticResponse::json(200, &json!({"id": 1}));
        assert_eq!(response.json().await.unwrap(), json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_empty_body_reads_as_null() {
        let response = StaticResponse::new(204).with_body("  \n");
        assert_eq!(response.json().await.unwrap(), serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let response = StaticResponse::new(200).with_body("<html>");
        let err = response.json().await.unwrap_err();
        assert!(matches!(err, SdkError::SerializationError(_)));
    }
}
