//! HTTP client functionality for rapor
//!
//! This crate wraps a configured reqwest client with the API's bearer and
//! API-key conventions, and implements the reporting endpoint as an
//! [`rapor_core::OrderSource`].

pub mod client;
pub mod config;
pub mod errors;
pub mod reports;
pub mod types;

// Re-export main types for convenience
pub use client::ApiClient;
pub use config::ClientConfig;
pub use errors::HttpError;
pub use reports::{ReportsClient, REPORTS_PATH};
pub use types::{ApiResponse, HttpMethod};
