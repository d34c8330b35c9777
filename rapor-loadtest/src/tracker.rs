//! Request tracking shared by all virtual users

use crate::journey::{IterationReport, Step};
use crate::results::{LoadTestResults, StepResults};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct StepCounters {
    requests: AtomicU64,
    checks_passed: AtomicU64,
    checks_failed: AtomicU64,
    response_time_ms: AtomicU64,
}

/// Collects latency samples and counters while a run is in progress
#[derive(Debug, Default)]
pub struct MetricsTracker {
    response_times: Mutex<Vec<u64>>,
    status_codes: Mutex<BTreeMap<u16, u64>>,
    total_requests: AtomicU64,
    failed_requests: AtomicU64,
    transport_errors: AtomicU64,
    iterations: AtomicU64,
    complete_iterations: AtomicU64,
    steps: [StepCounters; Step::COUNT],
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one journey request; `status` is `None` for transport failures
    pub async fn record_request(
        &self,
        step: Step,
        elapsed: Duration,
        status: Option<u16>,
        check_passed: bool,
    ) {
        let response_time_ms = elapsed.as_millis() as u64;

        self.total_requests.fetch_add(1, Ordering::Relaxed);
        match status {
            Some(code) => {
                if code >= 400 {
                    self.failed_requests.fetch_add(1, Ordering::Relaxed);
                }
                *self.status_codes.lock().await.entry(code).or_insert(0) += 1;
            }
            None => {
                self.failed_requests.fetch_add(1, Ordering::Relaxed);
                self.transport_errors.fetch_add(1, Ordering::Relaxed);
            }
        }

        let counters = &self.steps[step.index()];
        counters.requests.fetch_add(1, Ordering::Relaxed);
        counters
            .response_time_ms
            .fetch_add(response_time_ms, Ordering::Relaxed);
        if check_passed {
            counters.checks_passed.fetch_add(1, Ordering::Relaxed);
        } else {
            counters.checks_failed.fetch_add(1, Ordering::Relaxed);
        }

        self.response_times.lock().await.push(response_time_ms);
    }

    pub fn record_iteration(&self, report: &IterationReport) {
        self.iterations.fetch_add(1, Ordering::Relaxed);
        if report.all_passed() {
            self.complete_iterations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Summarize everything recorded so far
    pub async fn results(&self, duration: Duration, peak_virtual_users: u32) -> LoadTestResults {
        let mut response_times = self.response_times.lock().await.clone();
        response_times.sort_unstable();

        let total = self.total_requests.load(Ordering::Relaxed);
        let failed = self.failed_requests.load(Ordering::Relaxed);

        let steps = Step::all()
            .iter()
            .map(|step| {
                let counters = &self.steps[step.index()];
                let requests = counters.requests.load(Ordering::Relaxed);
                let total_ms = counters.response_time_ms.load(Ordering::Relaxed);
                StepResults {
                    step: step.name().to_string(),
                    requests,
                    checks_passed: counters.checks_passed.load(Ordering::Relaxed),
                    checks_failed: counters.checks_failed.load(Ordering::Relaxed),
                    average_response_time_ms: if requests == 0 {
                        0.0
                    } else {
                        total_ms as f64 / requests as f64
                    },
                }
            })
            .collect();

        let duration_ms = duration.as_millis() as u64;

        LoadTestResults {
            total_requests: total,
            failed_requests: failed,
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            failure_rate: if total == 0 {
                0.0
            } else {
                failed as f64 / total as f64
            },
            iterations: self.iterations.load(Ordering::Relaxed),
            complete_iterations: self.complete_iterations.load(Ordering::Relaxed),
            peak_virtual_users,
            duration,
            requests_per_second: if duration_ms == 0 {
                0.0
            } else {
                (total as f64 * 1000.0) / duration_ms as f64
            },
            average_response_time_ms: if response_times.is_empty() {
                0.0
            } else {
                response_times.iter().sum::<u64>() as f64 / response_times.len() as f64
            },
            min_response_time_ms: response_times.first().copied().unwrap_or(0),
            max_response_time_ms: response_times.last().copied().unwrap_or(0),
            p50_response_time_ms: percentile(&response_times, 50),
            p90_response_time_ms: percentile(&response_times, 90),
            p95_response_time_ms: percentile(&response_times, 95),
            p99_response_time_ms: percentile(&response_times, 99),
            steps,
            status_codes: self.status_codes.lock().await.clone(),
        }
    }
}

/// Nearest-rank percentile over sorted samples
fn percentile(sorted: &[u64], pct: usize) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (sorted.len() * pct).div_ceil(100);
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let samples: Vec<u64> = (1..=100).collect();
        assert_eq!(percentile(&samples, 50), 50);
        assert_eq!(percentile(&samples, 95), 95);
        assert_eq!(percentile(&samples, 99), 99);
        assert_eq!(percentile(&samples, 100), 100);
        assert_eq!(percentile(&[7], 95), 7);
        assert_eq!(percentile(&[1, 2], 50), 1);
        assert_eq!(percentile(&[], 95), 0);
    }

    #[test]
    fn test_single_outlier_in_twenty_does_not_set_p95() {
        let mut samples = vec![100u64; 19];
        samples.push(10_000);
        assert_eq!(percentile(&samples, 95), 100);

        let ranks: Vec<u64> = (1..=20).collect();
        assert_eq!(percentile(&ranks, 95), 19);
    }

    #[tokio::test]
    async fn test_failures_count_transport_errors_and_error_statuses() {
        let tracker = MetricsTracker::new();
        let ms = Duration::from_millis;

        tracker.record_request(Step::Login, ms(10), Some(200), true).await;
        tracker.record_request(Step::Products, ms(20), Some(304), false).await;
        tracker.record_request(Step::AddToCart, ms(30), Some(500), false).await;
        tracker.record_request(Step::PlaceOrder, ms(40), None, false).await;

        let results = tracker.results(Duration::from_secs(2), 3).await;

        assert_eq!(results.total_requests, 4);
        // 304 fails its check but is not a request failure
        assert_eq!(results.failed_requests, 2);
        assert_eq!(results.transport_errors, 1);
        assert_eq!(results.failure_rate, 0.5);
        assert_eq!(results.requests_per_second, 2.0);
        assert_eq!(results.min_response_time_ms, 10);
        assert_eq!(results.max_response_time_ms, 40);
        assert_eq!(results.average_response_time_ms, 25.0);
        assert_eq!(results.checks_passed(), 1);
        assert_eq!(results.checks_failed(), 3);
        assert_eq!(results.status_codes.len(), 3);
        assert_eq!(results.peak_virtual_users, 3);
    }

    #[tokio::test]
    async fn test_iterations() {
        let tracker = MetricsTracker::new();
        tracker.record_iteration(&IterationReport {
            checks: [true; Step::COUNT],
        });
        tracker.record_iteration(&IterationReport::default());

        let results = tracker.results(Duration::ZERO, 0).await;
        assert_eq!(results.iterations, 2);
        assert_eq!(results.complete_iterations, 1);
        assert_eq!(results.requests_per_second, 0.0);
        assert_eq!(results.p95_response_time_ms, 0);
    }
}
