//! Aggregation reducers behind the report views
//!
//! Each reducer makes a single pass over the current order list. Bucketed
//! views come back in the fixed enum order so chart axes stay stable between
//! refreshes.

use crate::order::OrderRow;
use crate::types::{Channel, OrderStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline metrics over the whole order list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_amount: Decimal,
    pub order_count: usize,
    /// `total_amount / order_count`, zero for an empty list
    pub avg_basket: Decimal,
    /// Share of returned orders, in percent
    pub returned_rate: f64,
    /// Share of orders with a printed cargo slip, in percent
    pub cargo_slip_rate: f64,
}

impl Totals {
    pub fn compute(orders: &[OrderRow]) -> Self {
        let mut total_amount = Decimal::ZERO;
        let mut returned = 0usize;
        let mut with_slip = 0usize;

        for order in orders {
            total_amount += order.amount;
            if order.is_returned() {
                returned += 1;
            }
            if order.has_cargo_slip() {
                with_slip += 1;
            }
        }

        let order_count = orders.len();
        let avg_basket = if order_count == 0 {
            Decimal::ZERO
        } else {
            total_amount / Decimal::from(order_count)
        };

        Self {
            total_amount,
            order_count,
            avg_basket,
            returned_rate: percent(returned, order_count),
            cargo_slip_rate: percent(with_slip, order_count),
        }
    }

    /// Average basket rounded for display
    pub fn avg_basket_display(&self) -> Decimal {
        self.avg_basket.round_dp(2)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Revenue and order count for one sales channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelBucket {
    pub channel: Channel,
    pub amount: Decimal,
    pub count: usize,
}

/// Per-channel totals, always five buckets in [`Channel::all`] order
pub fn by_channel(orders: &[OrderRow]) -> Vec<ChannelBucket> {
    let mut acc = [(Decimal::ZERO, 0usize); Channel::COUNT];

    for order in orders {
        let slot = &mut acc[order.channel.index()];
        slot.0 += order.amount;
        slot.1 += 1;
    }

    Channel::all()
        .iter()
        .zip(acc)
        .map(|(&channel, (amount, count))| ChannelBucket {
            channel,
            amount,
            count,
        })
        .collect()
}

/// Order count for one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    pub status: OrderStatus,
    pub count: usize,
    /// Set on the placeholder bucket emitted for an empty list
    pub synthetic: bool,
}

/// Per-status counts in [`OrderStatus::all`] order.
///
/// When every count is zero the result is a single synthetic `pending = 1`
/// bucket, so a pie chart never renders an empty ring. That bucket is a
/// display placeholder, not a data fact; check [`StatusBucket::synthetic`].
pub fn by_status(orders: &[OrderRow]) -> Vec<StatusBucket> {
    let mut counts = [0usize; OrderStatus::COUNT];
    for order in orders {
        counts[order.status.index()] += 1;
    }

    if counts.iter().all(|&c| c == 0) {
        return vec![StatusBucket {
            status: OrderStatus::Pending,
            count: 1,
            synthetic: true,
        }];
    }

    OrderStatus::all()
        .iter()
        .zip(counts)
        .map(|(&status, count)| StatusBucket {
            status,
            count,
            synthetic: false,
        })
        .collect()
}

/// Revenue and order count for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub count: usize,
}

/// Per-day totals, ascending by date; days without orders are absent
pub fn time_series(orders: &[OrderRow]) -> Vec<DayBucket> {
    let mut days: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();

    for order in orders {
        let slot = days.entry(order.date).or_insert((Decimal::ZERO, 0));
        slot.0 += order.amount;
        slot.1 += 1;
    }

    days.into_iter()
        .map(|(date, (amount, count))| DayBucket {
            date,
            amount,
            count,
        })
        .collect()
}

/// All four derived views of one order list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub totals: Totals,
    pub by_channel: Vec<ChannelBucket>,
    pub by_status: Vec<StatusBucket>,
    pub time_series: Vec<DayBucket>,
}

impl ReportSummary {
    pub fn compute(orders: &[OrderRow]) -> Self {
        Self {
            totals: Totals::compute(orders),
            by_channel: by_channel(orders),
            by_status: by_status(orders),
            time_series: time_series(orders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(
        id: &str,
        date: &str,
        channel: Channel,
        status: OrderStatus,
        amount: Decimal,
        slip: bool,
    ) -> OrderRow {
        OrderRow {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            channel,
            status,
            amount,
            customer_name: format!("Customer {}", id),
            cargo_provider: slip.then(|| "Aras".to_string()),
            cargo_slip_printed_at: slip.then(|| format!("{}T10:00:00Z", date)),
        }
    }

    fn sample() -> Vec<OrderRow> {
        vec![
            order("1", "2024-05-03", Channel::Trendyol, OrderStatus::Delivered, dec!(100.00), true),
            order("2", "2024-05-01", Channel::Website, OrderStatus::Returned, dec!(50.50), true),
            order("3", "2024-05-03", Channel::Trendyol, OrderStatus::Pending, dec!(20.25), false),
            order("4", "2024-05-02", Channel::Amazon, OrderStatus::Shipped, dec!(0), false),
        ]
    }

    #[test]
    fn test_totals() {
        let totals = Totals::compute(&sample());
        assert_eq!(totals.total_amount, dec!(170.75));
        assert_eq!(totals.order_count, 4);
        assert_eq!(totals.avg_basket, dec!(170.75) / dec!(4));
        assert_eq!(totals.avg_basket_display(), dec!(42.69));
        assert_eq!(totals.returned_rate, 25.0);
        assert_eq!(totals.cargo_slip_rate, 50.0);
    }

    #[test]
    fn test_totals_of_empty_list_are_zero() {
        let totals = Totals::compute(&[]);
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.order_count, 0);
        assert_eq!(totals.avg_basket, Decimal::ZERO);
        assert_eq!(totals.returned_rate, 0.0);
        assert_eq!(totals.cargo_slip_rate, 0.0);
    }

    #[test]
    fn test_channel_buckets_are_fixed_and_sum_to_total() {
        let orders = sample();
        let buckets = by_channel(&orders);

        let channels: Vec<Channel> = buckets.iter().map(|b| b.channel).collect();
        assert_eq!(channels, Channel::all().to_vec());

        let sum: Decimal = buckets.iter().map(|b| b.amount).sum();
        assert_eq!(sum, Totals::compute(&orders).total_amount);

        assert_eq!(buckets[Channel::Trendyol.index()].amount, dec!(120.25));
        assert_eq!(buckets[Channel::Trendyol.index()].count, 2);
        assert_eq!(buckets[Channel::N11.index()].count, 0);
        assert_eq!(by_channel(&[]).len(), Channel::COUNT);
    }

    #[test]
    fn test_status_counts_sum_to_order_count() {
        let orders = sample();
        let buckets = by_status(&orders);
        assert_eq!(buckets.len(), OrderStatus::COUNT);
        assert!(buckets.iter().all(|b| !b.synthetic));
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), orders.len());
        assert_eq!(buckets[OrderStatus::Returned.index()].count, 1);
    }

    #[test]
    fn test_empty_status_view_gets_single_placeholder() {
        let buckets = by_status(&[]);
        assert_eq!(
            buckets,
            vec![StatusBucket {
                status: OrderStatus::Pending,
                count: 1,
                synthetic: true,
            }]
        );
    }

    #[test]
    fn test_time_series_is_sorted_and_grouped() {
        let series = time_series(&sample());
        let dates: Vec<String> = series.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));

        let may_3 = &series[2];
        assert_eq!(may_3.amount, dec!(120.25));
        assert_eq!(may_3.count, 2);
    }

    #[test]
    fn test_summary_bundles_all_views() {
        let summary = ReportSummary::compute(&sample());
        assert_eq!(summary.totals.order_count, 4);
        assert_eq!(summary.by_channel.len(), Channel::COUNT);
        assert_eq!(summary.time_series.len(), 3);
    }
}
