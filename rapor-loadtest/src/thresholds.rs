//! Pass/fail thresholds evaluated over a finished run

use crate::results::LoadTestResults;
use rapor_config::domains::loadtest::ThresholdConfig;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// A declarative limit on the run's results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Threshold {
    /// 95th-percentile latency strictly below `ms`
    P95Below { ms: u64 },
    /// Failed request ratio strictly below `rate`
    FailureRateBelow { rate: f64 },
}

impl Threshold {
    pub fn from_config(config: &ThresholdConfig) -> Vec<Threshold> {
        vec![
            Threshold::P95Below { ms: config.p95_ms },
            Threshold::FailureRateBelow {
                rate: config.max_failure_rate,
            },
        ]
    }

    pub fn evaluate(&self, results: &LoadTestResults) -> ThresholdVerdict {
        let (observed, passed) = match *self {
            Threshold::P95Below { ms } => {
                let p95 = results.p95_response_time_ms;
                (p95 as f64, p95 < ms)
            }
            Threshold::FailureRateBelow { rate } => {
                (results.failure_rate, results.failure_rate < rate)
            }
        };

        ThresholdVerdict {
            threshold: *self,
            observed,
            passed,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::P95Below { ms } => write!(f, "p(95) < {}ms", ms),
            Threshold::FailureRateBelow { rate } => write!(f, "failure rate < {:.2}%", rate * 100.0),
        }
    }
}

/// Outcome of one threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdVerdict {
    pub threshold: Threshold,
    pub observed: f64,
    pub passed: bool,
}

impl fmt::Display for ThresholdVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.threshold {
            Threshold::P95Below { .. } => write!(f, "{} (observed {}ms)", self.threshold, self.observed),
            Threshold::FailureRateBelow { .. } => write!(
                f,
                "{} (observed {:.2}%)",
                self.threshold,
                self.observed * 100.0
            ),
        }
    }
}

/// Evaluate every configured threshold once over the whole run
pub fn evaluate_thresholds(
    config: &ThresholdConfig,
    results: &LoadTestResults,
) -> Vec<ThresholdVerdict> {
    Threshold::from_config(config)
        .iter()
        .map(|threshold| {
            let verdict = threshold.evaluate(results);
            if verdict.passed {
                info!(threshold = %threshold, observed = verdict.observed, "Threshold passed");
            } else {
                warn!(threshold = %threshold, observed = verdict.observed, "Threshold failed");
            }
            verdict
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::MetricsTracker;
    use crate::journey::Step;
    use std::time::Duration;

    async fn results_with(latencies: &[u64], failures: usize) -> LoadTestResults {
        let tracker = MetricsTracker::new();
        for (i, &ms) in latencies.iter().enumerate() {
            let status = if i < failures { 500 } else { 200 };
            tracker
                .record_request(Step::Products, Duration::from_millis(ms), Some(status), status == 200)
                .await;
        }
        tracker.results(Duration::from_secs(10), 1).await
    }

    #[tokio::test]
    async fn test_thresholds_pass() {
        let results = results_with(&[100; 200], 1).await;
        let verdicts = evaluate_thresholds(&ThresholdConfig::default(), &results);

        assert_eq!(verdicts.len(), 2);
        assert!(verdicts.iter().all(|v| v.passed));
    }

    #[tokio::test]
    async fn test_p95_limit_is_strict() {
        let results = results_with(&[500; 20], 0).await;
        let verdict = Threshold::P95Below { ms: 500 }.evaluate(&results);
        assert!(!verdict.passed);
        assert_eq!(verdict.observed, 500.0);
        assert_eq!(verdict.to_string(), "p(95) < 500ms (observed 500ms)");
    }

    #[tokio::test]
    async fn test_failure_rate_limit() {
        let results = results_with(&[10; 10], 1).await;
        let verdict = Threshold::FailureRateBelow { rate: 0.05 }.evaluate(&results);
        assert!(!verdict.passed);
        assert_eq!(verdict.observed, 0.1);
        assert_eq!(verdict.threshold.to_string(), "failure rate < 5.00%");
    }
}
