//! HTTP client implementation
//!
//! This module provides the core HTTP client for the SDK. Every call makes
//! exactly one request and hands the raw response to the normalizer, so the
//! caller always gets a [`ResultEnvelope`] back for an HTTP-level outcome.

use crate::config::SdkConfig;
use crate::envelope::{normalize, ResultEnvelope};
use crate::error::{SdkError, SdkResult};
use crate::pagination::{paginate, PageRequest, PaginatedList};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

/// The HTTP client for making API requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<SdkConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in &config.custom_headers {
            let name = header::HeaderName::try_from(name.as_str()).map_err(|e| {
                SdkError::ConfigurationError(format!("Invalid header name {}: {}", name, e))
            })?;
            let value = header::HeaderValue::try_from(value.as_str()).map_err(|e| {
                SdkError::ConfigurationError(format!("Invalid value for header {}: {}", name, e))
            })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .cookie_store(config.cookie_store)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(SdkError::NetworkError)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    pub fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<ResultEnvelope<T>> {
        let response = self
            .send::<(), ()>(Method::GET, path, None, None)
            .await?;
        self.read(normalize(response)).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SdkResult<ResultEnvelope<T>> {
        let response = self
            .send::<(), Q>(Method::GET, path, None, Some(query))
            .await?;
        self.read(normalize(response)).await
    }

    /// Fetch one page of a list endpoint
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: PageRequest,
    ) -> SdkResult<ResultEnvelope<PaginatedList<T>>> {
        let query = request.query();
        let response = self
            .send::<(), _>(Method::GET, path, None, Some(&query))
            .await?;
        self.read(paginate(response, request)).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SdkResult<ResultEnvelope<T>> {
        let response = self
            .send::<B, ()>(Method::POST, path, Some(body), None)
            .await?;
        self.read(normalize(response)).await
    }

    /// Make a POST request without a body
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> SdkResult<ResultEnvelope<T>> {
        let response = self
            .send::<(), ()>(Method::POST, path, None, None)
            .await?;
        self.read(normalize(response)).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SdkResult<ResultEnvelope<T>> {
        let response = self
            .send::<B, ()>(Method::PUT, path, Some(body), None)
            .await?;
        self.read(normalize(response)).await
    }

    /// Make a PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SdkResult<ResultEnvelope<T>> {
        let response = self
            .send::<B, ()>(Method::PATCH, path, Some(body), None)
            .await?;
        self.read(normalize(response)).await
    }

    /// Make a DELETE request. Whatever the server returns is discarded.
    pub async fn delete(&self, path: &str) -> SdkResult<ResultEnvelope<()>> {
        let response = self
            .send::<(), ()>(Method::DELETE, path, None, None)
            .await?;
        let envelope: ResultEnvelope<serde_json::Value> = self.read(normalize(response)).await?;
        Ok(envelope.map(|_| ()))
    }

    /// Await a body read, reporting a body that stalls past the timeout as
    /// [`SdkError::Timeout`]
    async fn read<T>(&self, body: impl Future<Output = SdkResult<T>>) -> SdkResult<T> {
        body.await
            .map_err(|e| e.reclassify_timeout(self.config.timeout.as_secs()))
    }

    /// Send a single request and return the raw response
    async fn send<B: Serialize + ?Sized, Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> SdkResult<Response> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);

        request = self.add_auth(request);

        if let Some(q) = query {
            request = request.query(q);
        }

        if let Some(b) = body {
            let body_str = serde_json::to_string(b)?;
            if self.config.enable_logging {
                debug!("Request body: {}", body_str);
            }
            request = request.body(body_str);
        }

        if self.config.enable_logging {
            debug!("Request: {} {}", method, url);
        }

        match request.send().await {
            Ok(response) => {
                if self.config.enable_logging {
                    debug!("Response: {} {} -> {}", method, url, response.status());
                }
                Ok(response)
            }
            Err(e) => {
                error!("Request failed: {}", e);
                Err(SdkError::from_transport(e, self.config.timeout.as_secs()))
            }
        }
    }

    /// Add authentication to a request
    fn add_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.auth.to_header_value() {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        }
    }
}
