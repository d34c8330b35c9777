//! Fixed enumerations of the order domain

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sales channel an order originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Trendyol,
    Hepsiburada,
    N11,
    Amazon,
    Website,
}

impl Channel {
    /// Number of channels
    pub const COUNT: usize = 5;

    /// Get the wire representation of the channel
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Trendyol => "trendyol",
            Channel::Hepsiburada => "hepsiburada",
            Channel::N11 => "n11",
            Channel::Amazon => "amazon",
            Channel::Website => "website",
        }
    }

    /// Human-readable label used in exports and charts
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Trendyol => "Trendyol",
            Channel::Hepsiburada => "Hepsiburada",
            Channel::N11 => "N11",
            Channel::Amazon => "Amazon",
            Channel::Website => "Website",
        }
    }

    /// All channels in display order
    pub fn all() -> &'static [Channel; Channel::COUNT] {
        &[
            Channel::Trendyol,
            Channel::Hepsiburada,
            Channel::N11,
            Channel::Amazon,
            Channel::Website,
        ]
    }

    /// Position of the channel in [`Channel::all`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trendyol" => Ok(Channel::Trendyol),
            "hepsiburada" => Ok(Channel::Hepsiburada),
            "n11" => Ok(Channel::N11),
            "amazon" => Ok(Channel::Amazon),
            "website" => Ok(Channel::Website),
            _ => Err(ParseError::InvalidChannel(s.to_string())),
        }
    }
}

/// Fulfilment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Number of statuses
    pub const COUNT: usize = 6;

    /// Get the wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }

    /// Human-readable label used in exports and charts
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }

    /// All statuses in display order
    pub fn all() -> &'static [OrderStatus; OrderStatus::COUNT] {
        &[
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ]
    }

    /// Position of the status in [`OrderStatus::all`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            "returned" => Ok(OrderStatus::Returned),
            _ => Err(ParseError::InvalidStatus(s.to_string())),
        }
    }
}
