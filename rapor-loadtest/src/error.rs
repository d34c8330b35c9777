//! Load-test error types

use rapor_http::HttpError;
use thiserror::Error;

/// Errors that prevent a load test from running.
///
/// Failures of individual journey requests are never errors; they are
/// recorded as failed checks.
#[derive(Debug, Error)]
pub enum LoadTestError {
    #[error("Invalid load test configuration: {0}")]
    Config(String),

    #[error("No stages configured")]
    NoStages,

    #[error(transparent)]
    Http(#[from] HttpError),
}

pub type LoadTestResult<T> = Result<T, LoadTestError>;
