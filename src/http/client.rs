//! API client with session cookies and envelope decoding
//!
//! Provides the HTTP client every endpoint module is built on:
//! - Base URL resolution for relative paths
//! - A shared cookie jar that carries the login session
//! - Rate limiting to avoid hammering the backend
//! - Envelope decoding and error classification
//! - A separate, cookie-less client for presigned uploads

use super::envelope::{classify, Envelope};
use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{ApiError, Error, Result};
use bytes::Bytes;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for all API requests (e.g. `https://host/api`)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all API requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("matjip-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config builder
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }
}

/// Builder for API client config
#[derive(Default)]
pub struct ApiClientConfigBuilder {
    config: ApiClientConfig,
}

impl ApiClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ApiClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client for the Matjip backend
pub struct ApiClient {
    client: Client,
    upload_client: Client,
    cookies: Arc<Jar>,
    base_url: Url,
    config: ApiClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl ApiClient {
    /// Create a new client; fails if the base URL is not absolute
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let cookies = Arc::new(Jar::default());

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        // Presigned URLs carry their own authorization; never send the session
        let upload_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            upload_client,
            cookies,
            base_url,
            config,
            rate_limiter,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the cookie jar currently holds a cookie for the API host
    pub fn has_session_cookie(&self) -> bool {
        self.cookies.cookies(&self.base_url).is_some()
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// GET and decode `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str, config: RequestConfig) -> Result<T> {
        self.request(Method::GET, path, config).await
    }

    /// POST a JSON body and decode `data`
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, RequestConfig::new().json(serde_json::to_value(body)?))
            .await
    }

    /// PATCH a JSON body and decode `data`
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PATCH, path, RequestConfig::new().json(serde_json::to_value(body)?))
            .await
    }

    /// DELETE, ignoring any `data`
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request_empty(Method::DELETE, path, RequestConfig::default())
            .await
    }

    /// Make a request whose `data` is required
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.send(method, path, config).await?;
        decode::<T>(response)
            .await?
            .ok_or_else(|| ApiError::transport("Response envelope has no data").into())
    }

    /// Make a request whose `data` is irrelevant
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<()> {
        let response = self.send(method, path, config).await?;
        decode::<IgnoredAny>(response).await?;
        Ok(())
    }

    /// Upload raw bytes to a presigned URL
    ///
    /// Goes through the cookie-less client, so the session never reaches
    /// the storage provider.
    pub async fn upload_presigned(
        &self,
        upload_url: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<()> {
        let size = bytes.len();
        let response = self
            .upload_client
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Presigned upload rejected with {}: {}", status.as_u16(), body);
            return Err(classify(status.as_u16(), None).into());
        }

        debug!("Uploaded {} bytes to presigned URL", size);
        Ok(())
    }

    async fn send(&self, method: Method, path: &str, config: RequestConfig) -> Result<Response> {
        let full_url = self.build_url(path);
        self.throttle().await;

        let mut req = self.client.request(method.clone(), &full_url);
        req = self.apply_headers(req, &config.headers);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        debug!("Sending request: {} {}", method, full_url);
        let response = req.send().await.map_err(transport)?;
        debug!(
            "Response received: {} {} -> {}",
            method,
            full_url,
            response.status().as_u16()
        );
        Ok(response)
    }

    async fn throttle(&self) {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }
    }

    fn apply_headers(
        &self,
        mut req: RequestBuilder,
        extra: &HashMap<String, String>,
    ) -> RequestBuilder {
        for (key, value) in self.config.default_headers.iter().chain(extra) {
            req = req.header(key.as_str(), value.as_str());
        }
        req
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn transport(e: reqwest::Error) -> Error {
    warn!("Transport failure: {}", e);
    ApiError::transport(e.to_string()).into()
}

/// Decode an envelope, classifying failures
async fn decode<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(transport)?;
    let http_ok = (200..300).contains(&status);

    if !http_ok {
        // The error body may be absent or not an envelope at all
        let error = serde_json::from_slice::<Envelope<IgnoredAny>>(&bytes)
            .ok()
            .and_then(|envelope| envelope.error);
        return Err(classify(status, error).into());
    }

    if bytes.is_empty() {
        return Ok(None);
    }

    let envelope: Envelope<T> = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::transport(format!("Malformed response body: {e}")))?;
    Ok(envelope.into_result(status)?)
}
