//! HTTP client configuration

use rapor_config::domains::http::HttpConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings applied when building the underlying reqwest client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: u32,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,

    /// Maximum idle connections kept per host
    pub max_idle_per_host: usize,

    /// How long an idle pooled connection is kept
    pub idle_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        HttpConfig::default().into()
    }
}

impl From<HttpConfig> for ClientConfig {
    fn from(config: HttpConfig) -> Self {
        Self {
            timeout: config.timeout,
            max_redirects: config.max_redirects,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
            max_idle_per_host: config.pool.max_idle_per_host,
            idle_timeout: config.pool.idle_timeout,
            connect_timeout: config.pool.connection_timeout,
        }
    }
}

impl From<&HttpConfig> for ClientConfig {
    fn from(config: &HttpConfig) -> Self {
        config.clone().into()
    }
}
