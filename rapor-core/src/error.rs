//! Core error types for rapor

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while parsing domain identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid sales channel: '{0}'. Supported channels are: trendyol, hepsiburada, n11, amazon, website")]
    InvalidChannel(String),

    #[error("Invalid order status: '{0}'. Supported statuses are: pending, processing, shipped, delivered, cancelled, returned")]
    InvalidStatus(String),

    #[error("Invalid quick range: '{0}'. Supported ranges are: 7d, 30d, month, custom")]
    InvalidQuickRange(String),

    #[error("Invalid calendar day '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Errors raised while building a report filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Date range is inverted: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Custom range requires explicit start and end dates")]
    CustomRangeWithoutDates,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
