//! Domain-driven configuration management for rapor
//!
//! Configuration is split by functional domain (API access, HTTP client,
//! logging, reporting defaults, exports, load testing), loaded from YAML with
//! `RAPOR_*` environment overrides, and validated per domain.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    api::ApiConfig, export::ExportConfig, http::HttpConfig, loadtest::LoadTestConfig,
    logging::LoggingConfig, report::ReportConfig, RaporConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
