//! Aggregated load-test results

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-step request and check counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResults {
    pub step: String,
    pub requests: u64,
    pub checks_passed: u64,
    pub checks_failed: u64,
    pub average_response_time_ms: f64,
}

impl StepResults {
    pub fn check_pass_rate(&self) -> f64 {
        let total = self.checks_passed + self.checks_failed;
        if total == 0 {
            0.0
        } else {
            self.checks_passed as f64 / total as f64
        }
    }
}

/// Load test results for a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadTestResults {
    pub total_requests: u64,
    /// Transport errors plus responses with status >= 400
    pub failed_requests: u64,
    pub transport_errors: u64,
    pub failure_rate: f64,
    pub iterations: u64,
    pub complete_iterations: u64,
    pub peak_virtual_users: u32,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    pub requests_per_second: f64,
    pub average_response_time_ms: f64,
    pub min_response_time_ms: u64,
    pub max_response_time_ms: u64,
    pub p50_response_time_ms: u64,
    pub p90_response_time_ms: u64,
    pub p95_response_time_ms: u64,
    pub p99_response_time_ms: u64,
    /// In [`crate::Step::all`] order
    pub steps: Vec<StepResults>,
    pub status_codes: BTreeMap<u16, u64>,
}

impl LoadTestResults {
    pub fn checks_passed(&self) -> u64 {
        self.steps.iter().map(|s| s.checks_passed).sum()
    }

    pub fn checks_failed(&self) -> u64 {
        self.steps.iter().map(|s| s.checks_failed).sum()
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
