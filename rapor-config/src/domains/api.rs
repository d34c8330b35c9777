//! Backend API access configuration

use crate::error::ConfigResult;
use crate::validation::{validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// Backend API access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the e-commerce API (e.g. `https://api.example.com/api`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token used for the admin reporting endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API key sent as `x-api-key` by the load-test journey
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            api_key: None,
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash, ready for path joining
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Validatable for ApiConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.base_url, "base_url", self.domain_name())?;

        if let Some(ref token) = self.token {
            if token.trim().is_empty() {
                return Err(self.validation_error("token cannot be blank when set"));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "api"
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}
