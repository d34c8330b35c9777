//! Checkout load testing for rapor
//!
//! Virtual users repeatedly walk the login, catalogue, cart and order
//! endpoints while a controller ramps their number through configured
//! stages. Per-request metrics are collected for the whole run and checked
//! against declarative thresholds at the end.

pub mod error;
pub mod journey;
pub mod results;
pub mod runner;
pub mod stage;
pub mod thresholds;
pub mod tracker;

pub use error::{LoadTestError, LoadTestResult};
pub use journey::{CheckoutJourney, Credentials, IterationReport, Step};
pub use results::{LoadTestResults, StepResults};
pub use runner::{LoadRunner, RunnerSettings};
pub use stage::{Stage, StagePlan};
pub use thresholds::{evaluate_thresholds, Threshold, ThresholdVerdict};
pub use tracker::MetricsTracker;
