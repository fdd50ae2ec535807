//! SDK error types
//!
//! HTTP status failures never show up here: they are carried inside a
//! [`ResultEnvelope`](crate::envelope::ResultEnvelope). `SdkError` covers
//! what propagates as `Err`: transport failures, unparsable success bodies,
//! and invalid configuration.

use thiserror::Error;

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// A success response carried a body that is not the expected JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Classify a reqwest error, pulling timeouts out into their own variant
    pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            SdkError::Timeout(timeout_secs)
        } else {
            SdkError::NetworkError(err)
        }
    }

    /// Re-tag a network error as a timeout when the body read ran out of time
    pub(crate) fn reclassify_timeout(self, timeout_secs: u64) -> Self {
        match self {
            SdkError::NetworkError(err) => Self::from_transport(err, timeout_secs),
            other => other,
        }
    }

    /// True when the failure happened below HTTP (connect, timeout, body read)
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::NetworkError(_) | SdkError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_from_json() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let sdk: SdkError = err.into();

        assert!(matches!(sdk, SdkError::SerializationError(_)));
        assert!(!sdk.is_transport());
    }

    #[test]
    fn test_timeout_is_transport() {
        let err = SdkError::Timeout(30);
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Request timed out after 30 seconds");
    }

    #[test]
    fn test_url_error_display() {
        let err: SdkError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid URL"));
    }
}
