//! Reporting defaults

use crate::error::ConfigResult;
use crate::validation::{validate_enum_choice, Validatable};
use serde::{Deserialize, Serialize};

/// Quick-range preset ids accepted by the report filter
pub const QUICK_RANGE_CHOICES: &[&str] = &["7d", "30d", "month", "custom"];

/// Sales channel ids accepted by the reporting endpoint
pub const CHANNEL_CHOICES: &[&str] = &["trendyol", "hepsiburada", "n11", "amazon", "website"];

/// Order status ids accepted by the reporting endpoint
pub const STATUS_CHOICES: &[&str] = &[
    "pending",
    "processing",
    "shipped",
    "delivered",
    "cancelled",
    "returned",
];

/// Default filter applied when the CLI is given no explicit filter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Quick-range preset used when no dates are given
    #[serde(default = "default_range")]
    pub default_range: String,

    /// Channel filter applied by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_channel: Option<String>,

    /// Status filter applied by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_range: default_range(),
            default_channel: None,
            default_status: None,
        }
    }
}

impl Validatable for ReportConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_enum_choice(
            &self.default_range,
            QUICK_RANGE_CHOICES,
            "default_range",
            self.domain_name(),
        )?;

        if self.default_range.eq_ignore_ascii_case("custom") {
            return Err(self.validation_error(
                "default_range cannot be 'custom'; custom ranges need explicit dates",
            ));
        }

        if let Some(ref channel) = self.default_channel {
            validate_enum_choice(channel, CHANNEL_CHOICES, "default_channel", self.domain_name())?;
        }

        if let Some(ref status) = self.default_status {
            validate_enum_choice(status, STATUS_CHOICES, "default_status", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "report"
    }
}

fn default_range() -> String {
    "7d".to_string()
}
