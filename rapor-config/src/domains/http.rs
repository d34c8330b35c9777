//! Settings for the outbound HTTP client shared by reporting and load tests

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout, in seconds on the wire
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub timeout: Duration,

    pub max_redirects: u32,

    pub user_agent: String,

    /// Disable only against staging shops with self-signed certificates
    pub verify_ssl: bool,

    pub pool: PoolConfig,
}

/// Keep-alive pool; load tests reuse connections heavily
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_idle_per_host: usize,

    #[serde(with = "crate::domains::utils::serde_duration")]
    pub idle_timeout: Duration,

    /// TCP connect timeout
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub connection_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: concat!("rapor/", env!("CARGO_PKG_VERSION")).to_string(),
            verify_ssl: true,
            pool: PoolConfig::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 64,
            idle_timeout: Duration::from_secs(90),
            connection_timeout: Duration::from_secs(10),
        }
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        validate_positive(self.timeout.as_secs(), "timeout", domain)?;
        validate_required_string(&self.user_agent, "user_agent", domain)?;
        validate_positive(self.pool.max_idle_per_host, "pool.max_idle_per_host", domain)?;
        validate_positive(self.pool.idle_timeout.as_secs(), "pool.idle_timeout", domain)?;
        validate_positive(
            self.pool.connection_timeout.as_secs(),
            "pool.connection_timeout",
            domain,
        )
    }

    fn domain_name(&self) -> &'static str {
        "http"
    }
}
