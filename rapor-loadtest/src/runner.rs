//! Staged virtual-user runner

use crate::error::{LoadTestError, LoadTestResult};
use crate::journey::{CheckoutJourney, Credentials};
use crate::results::LoadTestResults;
use crate::stage::StagePlan;
use crate::tracker::MetricsTracker;
use rapor_config::RaporConfig;
use rapor_http::{ApiClient, ClientConfig};
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{interval, sleep, timeout, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Timing knobs of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Pause after each iteration
    pub think_time: Duration,
    /// How often the target is recomputed
    pub tick_interval: Duration,
    /// Time in-flight iterations get after the last stage
    pub graceful_stop: Duration,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            think_time: Duration::from_secs(1),
            tick_interval: Duration::from_secs(1),
            graceful_stop: Duration::from_secs(30),
        }
    }
}

/// Live and wanted virtual-user counts shared with every virtual user
#[derive(Debug, Default)]
struct Population {
    live: AtomicU32,
    target: AtomicU32,
}

impl Population {
    /// Claim a retirement slot if more users are live than wanted
    fn try_retire(&self) -> bool {
        loop {
            let live = self.live.load(Ordering::SeqCst);
            if live <= self.target.load(Ordering::SeqCst) {
                return false;
            }
            if self
                .live
                .compare_exchange(live, live - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return true;
            }
        }
    }
}

/// Ramps virtual users through a [`StagePlan`] while they run the checkout journey
pub struct LoadRunner {
    journey: Arc<CheckoutJourney>,
    plan: StagePlan,
    settings: RunnerSettings,
}

impl LoadRunner {
    pub fn new(journey: CheckoutJourney, plan: StagePlan, settings: RunnerSettings) -> Self {
        Self {
            journey: Arc::new(journey),
            plan,
            settings,
        }
    }

    /// Build the runner described by the loadtest, api and http domains
    pub fn from_config(config: &RaporConfig) -> LoadTestResult<Self> {
        let loadtest = &config.loadtest;
        if loadtest.tick_interval.is_zero() {
            return Err(LoadTestError::Config(
                "tick_interval must be positive".to_string(),
            ));
        }

        let client = ApiClient::new(config.loadtest_base_url(), &ClientConfig::from(&config.http))?;
        let journey = CheckoutJourney::new(
            client,
            Credentials {
                email: loadtest.email.clone(),
                password: loadtest.password.clone(),
            },
        )
        .with_api_key(config.api.api_key.clone());

        Ok(Self::new(
            journey,
            StagePlan::from_config(&loadtest.stages)?,
            RunnerSettings {
                think_time: loadtest.think_time,
                tick_interval: loadtest.tick_interval,
                graceful_stop: loadtest.graceful_stop,
            },
        ))
    }

    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    /// Run every stage to completion
    pub async fn run(&self) -> LoadTestResults {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Run until the plan ends or `shutdown` resolves, whichever is first
    pub async fn run_until<F>(&self, shutdown: F) -> LoadTestResults
    where
        F: Future<Output = ()>,
    {
        let tracker = Arc::new(MetricsTracker::new());
        let population = Arc::new(Population::default());
        let mut users = JoinSet::new();

        let total = self.plan.total_duration();
        let started = Instant::now();
        let mut ticker = interval(self.settings.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut current_stage = None;
        let mut peak = 0u32;
        let mut next_id = 0u64;

        info!(
            stages = self.plan.stages().len(),
            peak = self.plan.peak(),
            duration_secs = total.as_secs(),
            "Starting load test"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut shutdown => {
                    warn!("Shutdown requested, stopping ramp early");
                    break;
                }
            }

            let elapsed = started.elapsed();
            let Some(stage) = self.plan.stage_at(elapsed) else {
                break;
            };
            if current_stage != Some(stage) {
                let current = self.plan.stages()[stage];
                info!(
                    stage = stage + 1,
                    target = current.target,
                    duration_secs = current.duration.as_secs(),
                    "Entering stage"
                );
                current_stage = Some(stage);
            }

            let target = self.plan.target_at(elapsed);
            population.target.store(target, Ordering::SeqCst);

            while population.live.load(Ordering::SeqCst) < target {
                population.live.fetch_add(1, Ordering::SeqCst);
                next_id += 1;
                let offset = jitter(self.settings.tick_interval);
                users.spawn(virtual_user(
                    next_id,
                    Arc::clone(&self.journey),
                    Arc::clone(&tracker),
                    Arc::clone(&population),
                    self.settings.think_time,
                    offset,
                ));
            }
            peak = peak.max(population.live.load(Ordering::SeqCst));

            while users.try_join_next().is_some() {}
        }

        population.target.store(0, Ordering::SeqCst);
        let in_flight = users.len();
        debug!(in_flight, "Ramp finished, draining virtual users");

        let drain = async { while users.join_next().await.is_some() {} };
        if timeout(self.settings.graceful_stop, drain).await.is_err() {
            warn!(
                remaining = users.len(),
                "Graceful stop window elapsed, aborting virtual users"
            );
            users.abort_all();
            while users.join_next().await.is_some() {}
        }

        let results = tracker.results(started.elapsed(), peak).await;
        info!(
            requests = results.total_requests,
            iterations = results.iterations,
            failure_rate = results.failure_rate,
            p95_ms = results.p95_response_time_ms,
            "Load test finished"
        );
        results
    }
}

/// Random start offset within one tick so a ramp step does not arrive as a burst
fn jitter(tick: Duration) -> Duration {
    let max = tick.as_millis() as u64;
    if max == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(fastrand::u64(0..max))
    }
}

async fn virtual_user(
    id: u64,
    journey: Arc<CheckoutJourney>,
    tracker: Arc<MetricsTracker>,
    population: Arc<Population>,
    think_time: Duration,
    offset: Duration,
) {
    sleep(offset).await;
    debug!(vu = id, "Virtual user started");

    loop {
        if population.try_retire() {
            break;
        }
        journey.run_iteration(&tracker).await;
        if population.try_retire() {
            break;
        }
        sleep(think_time).await;
    }

    debug!(vu = id, "Virtual user retired");
}
