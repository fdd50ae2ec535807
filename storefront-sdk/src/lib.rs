//! Storefront SDK
//!
//! This crate provides a Rust client for the storefront admin API: product
//! catalog CRUD, user management, and session login/logout.
//!
//! Every call resolves to a [`ResultEnvelope`]. An HTTP failure status is not
//! an `Err`: the envelope carries `success = false`, the status text as
//! `message`, and the status code and raw body as `error`. `Err` is reserved
//! for transport failures and for success bodies that do not parse.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storefront_sdk::{PageRequest, StorefrontClient, SdkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StorefrontClient::new(SdkConfig::new("http://localhost:3000/api"))?;
//!
//!     let envelope = client.products().list(PageRequest::new(1, 20)).await?;
//!     match envelope.into_result() {
//!         Ok(page) => println!(
//!             "{} products on page {} of {}",
//!             page.items.len(),
//!             page.pagination.current_page,
//!             page.pagination.total_pages()
//!         ),
//!         Err(failed) => eprintln!("{}", failed),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Normalizing responses from another transport
//!
//! ```rust
//! use storefront_sdk::{normalize, ResultEnvelope, StaticResponse};
//!
//! # async fn example() -> Result<(), storefront_sdk::SdkError> {
//! let response = StaticResponse::new(404).with_status_text("Not Found");
//! let envelope: ResultEnvelope<serde_json::Value> = normalize(response).await?;
//!
//! assert!(!envelope.is_success());
//! assert_eq!(envelope.error().unwrap().code, "404");
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod resources;
pub mod session;
pub mod transport;

pub use client::HttpClient;
pub use config::{AuthConfig, SdkConfig, SdkConfigBuilder, DEFAULT_BASE_URL};
pub use envelope::{normalize, ErrorDetail, RequestFailed, ResultEnvelope};
pub use error::{SdkError, SdkResult};
pub use pagination::{paginate, PageRequest, PaginatedList, Pagination};
pub use session::{AuthStatus, Session};
pub use transport::{StaticResponse, TransportResponse};

pub use resources::auth::{AuthClient, AuthToken, Credentials};
pub use resources::products::{
    Dimensions, NewProduct, Product, ProductMeta, ProductUpdate, ProductsClient, Review,
};
pub use resources::users::{Address, Company, Hair, NewUser, User, UserUpdate, UsersClient};

use std::sync::Arc;

/// The main client for the storefront API.
///
/// Resource sub-clients share one [`HttpClient`], and with it one cookie
/// store, so a login through [`StorefrontClient::auth`] authenticates later
/// product and user calls.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http_client: Arc<HttpClient>,
    auth: AuthClient,
    products: ProductsClient,
    users: UsersClient,
}

impl StorefrontClient {
    /// Create a new client with the given configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use storefront_sdk::{StorefrontClient, SdkConfig};
    ///
    /// let config = SdkConfig::new("https://shop.example.com/api").with_bearer_token("token");
    /// let client = StorefrontClient::new(config)?;
    /// # Ok::<(), storefront_sdk::SdkError>(())
    /// ```
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        let http_client = Arc::new(HttpClient::new(config)?);

        Ok(Self {
            auth: AuthClient::new(Arc::clone(&http_client)),
            products: ProductsClient::new(Arc::clone(&http_client)),
            users: UsersClient::new(Arc::clone(&http_client)),
            http_client,
        })
    }

    /// Create a new client using a builder pattern.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Login, logout and session checks
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Product catalog
    pub fn products(&self) -> &ProductsClient {
        &self.products
    }

    /// User management
    pub fn users(&self) -> &UsersClient {
        &self.users
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// This is useful for making custom requests not covered by the resource clients.
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Get the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.http_client.config().base_url
    }
}

/// Builder for creating a [`StorefrontClient`] with fluent configuration.
#[derive(Debug)]
pub struct ClientBuilder {
    config_builder: SdkConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config_builder: SdkConfig::builder(base_url),
        }
    }

    /// Set the authentication configuration.
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.config_builder = self.config_builder.with_auth(auth);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.with_timeout(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.with_connect_timeout(timeout);
        self
    }

    /// Enable or disable the cookie store.
    pub fn with_cookie_store(mut self, enable: bool) -> Self {
        self.config_builder = self.config_builder.with_cookie_store(enable);
        self
    }

    /// Enable or disable request/response logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.config_builder = self.config_builder.with_logging(enable);
        self
    }

    /// Add a custom header to all requests.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.with_header(name, value);
        self
    }

    /// Build the client.
    pub fn build(self) -> SdkResult<StorefrontClient> {
        StorefrontClient::new(self.config_builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = StorefrontClient::builder("https://shop.example.com/api")
            .with_auth(AuthConfig::BearerToken("token".to_string()))
            .with_timeout(std::time::Duration::from_secs(30))
            .with_logging(true)
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://shop.example.com/api");
        assert_eq!(
            client.http_client().config().auth,
            AuthConfig::BearerToken("token".to_string())
        );
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let result = StorefrontClient::new(SdkConfig::new(""));
        assert!(matches!(result, Err(SdkError::ConfigurationError(_))));
    }
}
