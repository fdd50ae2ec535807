//! Authentication resource client
//!
//! The server keeps the session in a cookie set by `/auth/login`; the
//! returned access token can also be sent as a bearer token by callers that
//! do not keep cookies between runs.

use crate::client::HttpClient;
use crate::envelope::ResultEnvelope;
use crate::error::SdkResult;
use crate::resources::users::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Client for authentication operations
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Arc<HttpClient>,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Log in with a username and password
    pub async fn login(&self, credentials: &Credentials) -> SdkResult<ResultEnvelope<AuthToken>> {
        self.client.post("/auth/login", credentials).await
    }

    /// End the server session
    pub async fn logout(&self) -> SdkResult<ResultEnvelope<()>> {
        let envelope: ResultEnvelope<serde_json::Value> =
            self.client.post_empty("/auth/logout").await?;
        Ok(envelope.map(|_| ()))
    }

    /// Check whether the current session is still valid
    pub async fn check(&self) -> SdkResult<ResultEnvelope<()>> {
        let envelope: ResultEnvelope<serde_json::Value> =
            self.client.post_empty("/auth/check").await?;
        Ok(envelope.map(|_| ()))
    }

    /// Fetch the user the session belongs to
    pub async fn me(&self) -> SdkResult<ResultEnvelope<User>> {
        self.client.get("/auth/me").await
    }
}

/// Login payload
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Create login credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Tokens issued on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
