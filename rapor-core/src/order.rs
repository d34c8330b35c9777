//! Order snapshot model

use crate::types::{Channel, OrderStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// An immutable order snapshot returned by the reporting endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    /// Backend identifier; numeric ids are kept in their decimal form
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,

    /// Calendar day the order was placed
    #[serde(deserialize_with = "de::calendar_day")]
    pub date: NaiveDate,

    pub channel: Channel,

    pub status: OrderStatus,

    #[serde(deserialize_with = "de::non_negative_amount")]
    pub amount: Decimal,

    pub customer_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_provider: Option<String>,

    /// When the cargo slip was printed, as sent by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_slip_printed_at: Option<String>,
}

impl OrderRow {
    /// Whether a cargo slip has been printed for this order
    pub fn has_cargo_slip(&self) -> bool {
        self.cargo_slip_printed_at.is_some()
    }

    /// Whether the order ended up returned
    pub fn is_returned(&self) -> bool {
        self.status == OrderStatus::Returned
    }
}

mod de {
    use super::*;
    use serde::de::Error;
    use serde_json::Value;

    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!(
                "expected string or number id, got {}",
                other
            ))),
        }
    }

    /// Accepts `YYYY-MM-DD` or any timestamp starting with it
    pub fn calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let day = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| D::Error::custom(format!("invalid order date '{}': {}", raw, e)))
    }

    pub fn non_negative_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(D::Error::custom(format!(
                "order amount must be non-negative, got {}",
                amount
            )));
        }
        Ok(amount)
    }
}
