//! Concurrency ramp

use crate::error::{LoadTestError, LoadTestResult};
use rapor_config::domains::loadtest::StageConfig;
use serde::Serialize;
use std::time::Duration;

/// One ramp segment: move linearly to `target` users over `duration`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub duration: Duration,
    pub target: u32,
}

impl Stage {
    pub fn new(duration: Duration, target: u32) -> Self {
        Self { duration, target }
    }
}

impl From<&StageConfig> for Stage {
    fn from(config: &StageConfig) -> Self {
        Self::new(config.duration, config.target)
    }
}

/// Ordered stages starting from zero users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePlan {
    stages: Vec<Stage>,
}

impl StagePlan {
    pub fn new(stages: Vec<Stage>) -> LoadTestResult<Self> {
        if stages.is_empty() {
            return Err(LoadTestError::NoStages);
        }
        if stages.iter().any(|s| s.duration.is_zero()) {
            return Err(LoadTestError::Config(
                "stage durations must be positive".to_string(),
            ));
        }
        Ok(Self { stages })
    }

    pub fn from_config(stages: &[StageConfig]) -> LoadTestResult<Self> {
        Self::new(stages.iter().map(Stage::from).collect())
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn peak(&self) -> u32 {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }

    /// Index of the stage active at `elapsed`, `None` once the plan is over
    pub fn stage_at(&self, elapsed: Duration) -> Option<usize> {
        let mut end = Duration::ZERO;
        for (index, stage) in self.stages.iter().enumerate() {
            end += stage.duration;
            if elapsed < end {
                return Some(index);
            }
        }
        None
    }

    /// Virtual-user target at `elapsed`, interpolated from the previous stage's target
    pub fn target_at(&self, elapsed: Duration) -> u32 {
        let mut from = 0u32;
        let mut stage_start = Duration::ZERO;

        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if elapsed < stage_end {
                let progress = (elapsed - stage_start).as_secs_f64() / stage.duration.as_secs_f64();
                let value = from as f64 + (stage.target as f64 - from as f64) * progress;
                return value.round() as u32;
            }
            from = stage.target;
            stage_start = stage_end;
        }

        from
    }
}

impl Default for StagePlan {
    fn default() -> Self {
        Self {
            stages: vec![
                Stage::new(Duration::from_secs(60), 200),
                Stage::new(Duration::from_secs(120), 500),
                Stage::new(Duration::from_secs(120), 1000),
                Stage::new(Duration::from_secs(60), 0),
            ],
        }
    }
}
