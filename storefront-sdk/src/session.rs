//! Application session state
//!
//! A [`Session`] holds whether the caller is logged in and who they are. It
//! is plain data owned by the application and handed to whatever needs it;
//! there is no process-wide instance.
//!
//! Lifecycle: [`Session::init`] verifies an existing server session at
//! startup, [`Session::login`] establishes one, and [`Session::logout`]
//! tears it down.

use crate::envelope::ResultEnvelope;
use crate::error::SdkResult;
use crate::resources::auth::{AuthToken, Credentials};
use crate::resources::users::{User, UserUpdate};
use crate::StorefrontClient;
use serde::Serialize;
use tracing::{info, warn};

/// Whether the session has been verified, and with what outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Not checked yet
    #[default]
    Unknown,
    /// Logged in
    Authenticated,
    /// Checked and not logged in
    Anonymous,
}

/// Authentication flag plus the current user
#[derive(Debug, Clone, Default)]
pub struct Session {
    status: AuthStatus,
    user: Option<User>,
    token: Option<AuthToken>,
}

impl Session {
    /// A session that has not been verified yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Current authentication status
    pub fn status(&self) -> AuthStatus {
        self.status
    }

    /// Whether the session is logged in
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// The logged-in user, if known
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Tokens from the last successful login in this session
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Verify the server session and load the current user.
    ///
    /// Any failure, whether a failure envelope or a transport error, leaves
    /// the session anonymous.
    pub async fn init(&mut self, client: &StorefrontClient) -> AuthStatus {
        match Self::fetch_current_user(client).await {
            Ok(user) => {
                info!(username = %user.username, "session verified");
                self.user = Some(user);
                self.status = AuthStatus::Authenticated;
            }
            Err(reason) => {
                info!(%reason, "no active session");
                self.clear();
            }
        }
        self.status
    }

    async fn fetch_current_user(client: &StorefrontClient) -> Result<User, String> {
        client
            .auth()
            .check()
            .await
            .map_err(|e| e.to_string())?
            .into_result()
            .map_err(|e| e.to_string())?;

        client
            .auth()
            .me()
            .await
            .map_err(|e| e.to_string())?
            .into_result()
            .map_err(|e| e.to_string())
    }

    /// Log in and load the current user.
    ///
    /// A failed login, or a failed lookup of the user right after it, is
    /// returned as a failure envelope and leaves the session anonymous.
    pub async fn login(
        &mut self,
        client: &StorefrontClient,
        credentials: &Credentials,
    ) -> SdkResult<ResultEnvelope<AuthToken>> {
        let envelope = match client.auth().login(credentials).await {
            Ok(envelope) => envelope,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        let Some(token) = envelope.data().cloned() else {
            warn!(username = %credentials.username, reason = envelope.message(), "login rejected");
            self.clear();
            return Ok(envelope);
        };

        let me = match client.auth().me().await {
            Ok(me) => me,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        if !me.is_success() {
            warn!(reason = me.message(), "login succeeded but user lookup failed");
            self.clear();
            return Ok(me.map(|_| token));
        }

        self.user = me.into_data();
        self.token = Some(token);
        self.status = AuthStatus::Authenticated;
        info!(username = %credentials.username, "logged in");

        Ok(envelope)
    }

    /// End the server session and clear local state.
    ///
    /// Local state is cleared whatever the server answers.
    pub async fn logout(&mut self, client: &StorefrontClient) -> SdkResult<ResultEnvelope<()>> {
        let result = client.auth().logout().await;
        self.clear();
        result
    }

    /// Replace the current user
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Merge a partial update into the current user; no-op without a user
    pub fn update_user(&mut self, update: &UserUpdate) {
        if let Some(user) = self.user.as_mut() {
            user.apply(update);
        }
    }

    /// Forget the user and mark the session anonymous
    pub fn clear(&mut self) {
        self.status = AuthStatus::Anonymous;
        self.user = None;
        self.token = None;
    }
}
