//! Core domain models and reducers for rapor
//!
//! This crate defines the order snapshot model, the report filter and its
//! quick-range presets, the four aggregation reducers behind the report
//! views, and the request-scoped report view state. Transport lives behind
//! the [`OrderSource`] trait so the core stays free of HTTP concerns.

pub mod aggregate;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod order;
pub mod source;
pub mod types;
pub mod view;

// Re-export commonly used types at the crate root
pub use aggregate::{
    by_channel, by_status, time_series, ChannelBucket, DayBucket, ReportSummary, StatusBucket,
    Totals,
};
pub use error::{FilterError, ParseError};
pub use fetcher::OrderFetcher;
pub use filter::{DateRange, QuickRange, ReportFilter};
pub use order::OrderRow;
pub use source::{FetchError, OrderSource, FETCH_FAILED_MESSAGE};
pub use types::{Channel, OrderStatus};
pub use view::{ApplyOutcome, ReportView, RequestTicket};
