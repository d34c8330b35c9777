//! Report filter state and quick-range presets

use crate::error::{FilterError, ParseError};
use crate::types::{Channel, OrderStatus};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form; converted through [`DateRange::new`]
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = FilterError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from `YYYY-MM-DD`
    pub fn parse(start: &str, end: &str) -> Result<Self, FilterError> {
        Self::new(parse_day(start)?, parse_day(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}

/// Named date-span preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuickRange {
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "month")]
    ThisMonth,
    #[serde(rename = "custom")]
    Custom,
}

impl QuickRange {
    /// Preset id as persisted and accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickRange::Last7Days => "7d",
            QuickRange::Last30Days => "30d",
            QuickRange::ThisMonth => "month",
            QuickRange::Custom => "custom",
        }
    }

    /// Resolve the preset against `today`; `Custom` has no fixed span
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        let start = match self {
            QuickRange::Last7Days => today - Duration::days(6),
            QuickRange::Last30Days => today - Duration::days(29),
            QuickRange::ThisMonth => today.with_day(1)?,
            QuickRange::Custom => return None,
        };
        Some(DateRange { start, end: today })
    }
}

impl fmt::Display for QuickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuickRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "7d" => Ok(QuickRange::Last7Days),
            "30d" => Ok(QuickRange::Last30Days),
            "month" => Ok(QuickRange::ThisMonth),
            "custom" => Ok(QuickRange::Custom),
            _ => Err(ParseError::InvalidQuickRange(s.to_string())),
        }
    }
}

/// Filter sent with every report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub range: DateRange,
    pub channel: Option<Channel>,
    pub status: Option<OrderStatus>,
}

impl ReportFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            channel: None,
            status: None,
        }
    }

    /// Filter for a quick-range preset resolved against `today`
    pub fn from_quick_range(range: QuickRange, today: NaiveDate) -> Result<Self, FilterError> {
        range
            .resolve(today)
            .map(Self::new)
            .ok_or(FilterError::CustomRangeWithoutDates)
    }

    pub fn with_channel(mut self, channel: Option<Channel>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_status(mut self, status: Option<OrderStatus>) -> Self {
        self.status = status;
        self
    }

    /// Query parameters for the reporting endpoint; unset filters are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("dateFrom", self.range.start().format("%Y-%m-%d").to_string()),
            ("dateTo", self.range.end().format("%Y-%m-%d").to_string()),
        ];
        if let Some(channel) = self.channel {
            pairs.push(("channel", channel.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}
