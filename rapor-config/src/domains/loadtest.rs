//! Checkout load-test configuration

use crate::error::ConfigResult;
use crate::validation::{
    validate_positive, validate_ratio, validate_required_string, validate_url, Validatable,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Load-test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadTestConfig {
    /// Target API; falls back to `api.base_url` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Login email used by every virtual user
    #[serde(default = "default_email")]
    pub email: String,

    /// Login password used by every virtual user
    #[serde(default = "default_password")]
    pub password: String,

    /// Pause after each completed journey
    #[serde(
        with = "crate::domains::utils::serde_duration_millis",
        default = "default_think_time"
    )]
    pub think_time: Duration,

    /// How often the runner re-evaluates the virtual-user target
    #[serde(
        with = "crate::domains::utils::serde_duration_millis",
        default = "default_tick_interval"
    )]
    pub tick_interval: Duration,

    /// Time in-flight iterations get to finish after the last stage
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_graceful_stop"
    )]
    pub graceful_stop: Duration,

    /// Concurrency ramp
    #[serde(default = "default_stages")]
    pub stages: Vec<StageConfig>,

    /// Pass/fail thresholds evaluated over the whole run
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

/// One segment of the concurrency ramp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage duration
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub duration: Duration,

    /// Virtual users reached at the end of the stage
    pub target: u32,
}

/// Declarative pass thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// 95th-percentile request latency must stay below this many milliseconds
    #[serde(default = "default_p95_ms")]
    pub p95_ms: u64,

    /// Ratio of failed requests must stay below this value
    #[serde(default = "default_max_failure_rate")]
    pub max_failure_rate: f64,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            email: default_email(),
            password: default_password(),
            think_time: default_think_time(),
            tick_interval: default_tick_interval(),
            graceful_stop: default_graceful_stop(),
            stages: default_stages(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            p95_ms: default_p95_ms(),
            max_failure_rate: default_max_failure_rate(),
        }
    }
}

impl LoadTestConfig {
    /// Total scheduled duration of all stages
    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Highest virtual-user target across all stages
    pub fn peak_users(&self) -> u32 {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }
}

impl Validatable for LoadTestConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(ref url) = self.base_url {
            validate_url(url, "base_url", self.domain_name())?;
        }

        validate_required_string(&self.email, "email", self.domain_name())?;
        validate_required_string(&self.password, "password", self.domain_name())?;
        validate_positive(
            self.tick_interval.as_millis(),
            "tick_interval",
            self.domain_name(),
        )?;

        if self.stages.is_empty() {
            return Err(self.validation_error("at least one stage must be configured"));
        }

        for (index, stage) in self.stages.iter().enumerate() {
            if stage.duration.is_zero() {
                return Err(
                    self.validation_error(format!("stage {} has a zero duration", index + 1))
                );
            }
        }

        self.thresholds.validate()
    }

    fn domain_name(&self) -> &'static str {
        "loadtest"
    }
}

impl Validatable for ThresholdConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.p95_ms, "p95_ms", self.domain_name())?;
        validate_ratio(
            self.max_failure_rate,
            "max_failure_rate",
            self.domain_name(),
        )
    }

    fn domain_name(&self) -> &'static str {
        "loadtest.thresholds"
    }
}

// Default value functions
fn default_email() -> String {
    "loadtest@example.com".to_string()
}

fn default_password() -> String {
    "loadtest".to_string()
}

fn default_think_time() -> Duration {
    Duration::from_secs(1)
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_graceful_stop() -> Duration {
    Duration::from_secs(30)
}

fn default_stages() -> Vec<StageConfig> {
    vec![
        StageConfig {
            duration: Duration::from_secs(60),
            target: 200,
        },
        StageConfig {
            duration: Duration::from_secs(120),
            target: 500,
        },
        StageConfig {
            duration: Duration::from_secs(120),
            target: 1000,
        },
        StageConfig {
            duration: Duration::from_secs(60),
            target: 0,
        },
    ]
}

fn default_p95_ms() -> u64 {
    500
}

fn default_max_failure_rate() -> f64 {
    0.01
}
