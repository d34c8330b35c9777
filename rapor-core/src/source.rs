//! Seam between the report core and its transport

use crate::filter::ReportFilter;
use crate::order::OrderRow;
use async_trait::async_trait;
use thiserror::Error;

/// Message shown when a fetch fails without a backend-supplied explanation
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load report";

/// Why a report fetch failed.
///
/// Users only ever see one error class ("fetch failed"); the variants exist
/// so logs can tell a dead network from a rejected token.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Invalid report payload: {0}")]
    Decode(String),

    #[error("Report request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}

impl FetchError {
    /// The single human-readable message surfaced to the user
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Status {
                message: Some(message),
                ..
            }
            | FetchError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            _ => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Anything that can produce the order list for a filter
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_orders(&self, filter: &ReportFilter) -> Result<Vec<OrderRow>, FetchError>;
}
