//! HTTP client implementation

use crate::config::ClientConfig;
use crate::errors::HttpError;
use crate::types::{ApiResponse, HttpMethod};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use serde_json::Value as JsonValue;
use std::time::Instant;
use tracing::debug;
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the shop API rooted at a base URL.
///
/// Cloning is cheap and shares the connection pool; credentials are per clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    bearer: Option<String>,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with the given transport settings
    pub fn new(base_url: &str, config: &ClientConfig) -> Result<Self, HttpError> {
        // Url::join drops the last segment unless the base ends with a slash
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;

        debug!(
            "Creating ApiClient for {} with timeout: {}s",
            base_url,
            config.timeout.as_secs()
        );

        Ok(Self {
            client: build_client(config)?,
            base_url,
            bearer: None,
            api_key: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Send `x-api-key: <key>` with every request
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn set_bearer(&mut self, token: Option<String>) {
        self.bearer = token;
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL
    pub fn url(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HttpError::InvalidUrl(format!("{path}: {e}")))
    }

    fn headers(&self) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.bearer {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| HttpError::InvalidHeaderValue(AUTHORIZATION.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| HttpError::InvalidHeaderValue(API_KEY_HEADER.to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }
        Ok(headers)
    }

    /// Perform one request; non-2xx statuses are returned, not raised
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&JsonValue>,
    ) -> Result<ApiResponse, HttpError> {
        let url = self.url(path)?;
        debug!("Building {} request to {}", method, url);

        let mut request = self
            .client
            .request(method.into(), url)
            .headers(self.headers()?);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let elapsed = started.elapsed();

        debug!(
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = text.len(),
            "HTTP response received"
        );

        let body = if text.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
        };

        Ok(ApiResponse {
            status,
            body,
            elapsed,
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, HttpError> {
        self.request(HttpMethod::Get, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &JsonValue) -> Result<ApiResponse, HttpError> {
        self.request(HttpMethod::Post, path, &[], Some(body)).await
    }
}

fn build_client(config: &ClientConfig) -> Result<Client, HttpError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(!config.verify_ssl)
        .redirect(reqwest::redirect::Policy::limited(
            config.max_redirects as usize,
        ))
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(config.idle_timeout)
        .build()?;
    Ok(client)
}
