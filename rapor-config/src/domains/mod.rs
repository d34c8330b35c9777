//! Domain-specific configuration modules

pub mod api;
pub mod export;
pub mod http;
pub mod loadtest;
pub mod logging;
pub mod report;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main rapor configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RaporConfig {
    /// Backend API access
    #[serde(default)]
    pub api: api::ApiConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// Reporting defaults
    #[serde(default)]
    pub report: report::ReportConfig,

    /// Export destination
    #[serde(default)]
    pub export: export::ExportConfig,

    /// Checkout load test
    #[serde(default)]
    pub loadtest: loadtest::LoadTestConfig,
}

impl RaporConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.api.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        self.report.validate()?;
        self.export.validate()?;
        self.loadtest.validate()?;

        Ok(())
    }

    /// Base URL the load test targets
    pub fn loadtest_base_url(&self) -> &str {
        self.loadtest
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or_else(|| self.api.trimmed_base_url())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = RaporConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loadtest_base_url_falls_back_to_api() {
        let mut config = RaporConfig::default();
        config.api.base_url = "https://shop.example.com/api/".to_string();
        assert_eq!(config.loadtest_base_url(), "https://shop.example.com/api");

        config.loadtest.base_url = Some("https://staging.example.com/".to_string());
        assert_eq!(config.loadtest_base_url(), "https://staging.example.com");
    }
}
