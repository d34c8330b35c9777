//! Structured logging setup for rapor
//!
//! Every crate in the workspace instruments with `tracing`; this crate owns
//! the one place where a global subscriber is installed.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
pub use rapor_config::domains::logging::{LogFormat, LogLevel, LoggingConfig};
