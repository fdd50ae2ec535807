//! Uniform result envelope and response normalization
//!
//! Every API call ends in a [`ResultEnvelope`]: either a success carrying the
//! parsed payload or a failure carrying the numeric status and the raw body.
//! A failure status is *data*, not an `Err`. Only transport problems and
//! unparsable success bodies surface as [`SdkError`](crate::SdkError).

use crate::error::SdkResult;
use crate::transport::TransportResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Message attached to every successful envelope
pub const SUCCESS_MESSAGE: &str = "Request successful";

/// Message used for failures when the transport has no status text
pub const FAILURE_MESSAGE: &str = "Request failed";

/// Structured detail of a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// Stringified numeric HTTP status
    pub code: String,
    /// Raw response body text
    pub details: String,
}

/// Success/failure wrapper around a response payload.
///
/// `data` is present exactly when `success` is true and `error` exactly when
/// it is false. Fields are private so that only [`ResultEnvelope::success`]
/// and [`ResultEnvelope::failure`] can build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    success: bool,
    message: String,
    data: Option<T>,
    error: Option<ErrorDetail>,
}

impl<T> ResultEnvelope<T> {
    /// Build a success envelope
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Build a failure envelope from a status, its reason phrase and the body
    pub fn failure(status_text: impl Into<String>, status: u16, details: impl Into<String>) -> Self {
        let status_text = status_text.into();
        let message = if status_text.is_empty() {
            FAILURE_MESSAGE.to_string()
        } else {
            status_text
        };

        Self {
            success: false,
            message,
            data: None,
            error: Some(ErrorDetail {
                code: status.to_string(),
                details: details.into(),
            }),
        }
    }

    /// Whether the request succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Human-readable outcome
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload of a successful request
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error detail of a failed request
    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    /// Take the payload, dropping the rest of the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Transform the payload of a successful envelope
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Convert into a `Result`, so failures compose with `?`
    pub fn into_result(self) -> Result<T, RequestFailed> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (_, error) => Err(RequestFailed {
                message: self.message,
                error: error.unwrap_or_else(|| ErrorDetail {
                    code: String::new(),
                    details: String::new(),
                }),
            }),
        }
    }
}

/// A failed request lifted out of its envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailed {
    /// Status text or [`FAILURE_MESSAGE`]
    pub message: String,
    /// Status code and body
    pub error: ErrorDetail,
}

impl RequestFailed {
    /// Numeric status, if the code is one
    pub fn status(&self) -> Option<u16> {
        self.error.code.parse().ok()
    }
}

impl fmt::Display for RequestFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.error.code)?;
        if !self.error.details.trim().is_empty() {
            write!(f, ": {}", self.error.details.trim())?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestFailed {}

/// Normalize a transport response into a [`ResultEnvelope`].
///
/// A failure status yields a failure envelope with the body text as detail.
/// A success status parses the body as JSON into `T`; a body that does not
/// parse is returned as `Err`.
pub async fn normalize<T, R>(response: R) -> SdkResult<ResultEnvelope<T>>
where
    T: DeserializeOwned,
    R: TransportResponse,
{
    if !response.is_success() {
        return failure_envelope(response).await;
    }

    let body = response.json().await?;
    let data = serde_json::from_value(body)?;
    Ok(ResultEnvelope::success(data))
}

/// Read a failed response into a failure envelope
pub(crate) async fn failure_envelope<T, R>(response: R) -> SdkResult<ResultEnvelope<T>>
where
    R: TransportResponse,
{
    let status = response.status();
    let status_text = response.status_text().to_string();
    let details = response.text().await?;

    debug!(status, %status_text, "request failed");
    Ok(ResultEnvelope::failure(status_text, status, details))
}
