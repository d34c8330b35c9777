//! Request-scoped report state

use crate::aggregate::ReportSummary;
use crate::filter::ReportFilter;
use crate::order::OrderRow;
use crate::source::FetchError;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Identifies one fetch; only the most recently issued ticket may apply its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The order list was replaced
    Applied { orders: usize },
    /// The previous order list was kept and the error message set
    Failed { message: String },
    /// A newer request was issued meanwhile; the result was discarded
    Stale,
}

/// Orders currently held for display, plus fetch status
#[derive(Debug, Default)]
pub struct ReportView {
    orders: Vec<OrderRow>,
    filter: Option<ReportFilter>,
    pending_filter: Option<ReportFilter>,
    error: Option<String>,
    issued: u64,
    loading: bool,
    updated_at: Option<DateTime<Utc>>,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new fetch for `filter`, superseding any in-flight one
    pub fn begin(&mut self, filter: ReportFilter) -> RequestTicket {
        self.issued += 1;
        self.loading = true;
        self.pending_filter = Some(filter);
        RequestTicket(self.issued)
    }

    /// Apply the result of the fetch identified by `ticket`
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<OrderRow>, FetchError>,
    ) -> ApplyOutcome {
        if ticket.0 != self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "Discarding superseded report response"
            );
            return ApplyOutcome::Stale;
        }

        self.loading = false;
        let filter = self.pending_filter.take();

        match result {
            Ok(orders) => {
                let count = orders.len();
                self.orders = orders;
                self.filter = filter;
                self.error = None;
                self.updated_at = Some(Utc::now());
                ApplyOutcome::Applied { orders: count }
            }
            Err(err) => {
                warn!(error = %err, "Report fetch failed");
                let message = err.user_message();
                self.error = Some(message.clone());
                ApplyOutcome::Failed { message }
            }
        }
    }

    pub fn orders(&self) -> &[OrderRow] {
        &self.orders
    }

    /// Filter the held orders were fetched with
    pub fn filter(&self) -> Option<&ReportFilter> {
        self.filter.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary::compute(&self.orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DateRange, QuickRange};
    use crate::types::{Channel, OrderStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn filter() -> ReportFilter {
        let today = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        ReportFilter::from_quick_range(QuickRange::Last7Days, today).unwrap()
    }

    fn orders(n: usize) -> Vec<OrderRow> {
        (0..n)
            .map(|i| OrderRow {
                id: i.to_string(),
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                channel: Channel::Website,
                status: OrderStatus::Delivered,
                amount: dec!(10),
                customer_name: "C".to_string(),
                cargo_provider: None,
                cargo_slip_printed_at: None,
            })
            .collect()
    }

    #[test]
    fn test_success_replaces_orders_wholesale() {
        let mut view = ReportView::new();
        let t1 = view.begin(filter());
        assert!(view.is_loading());
        assert_eq!(view.complete(t1, Ok(orders(3))), ApplyOutcome::Applied { orders: 3 });

        let t2 = view.begin(filter());
        view.complete(t2, Ok(orders(1)));
        assert_eq!(view.orders().len(), 1);
        assert!(!view.is_loading());
        assert!(view.updated_at().is_some());
        assert_eq!(view.filter(), Some(&filter()));
    }

    #[test]
    fn test_failure_keeps_previous_orders() {
        let mut view = ReportView::new();
        let t1 = view.begin(filter());
        view.complete(t1, Ok(orders(2)));

        let t2 = view.begin(filter());
        let outcome = view.complete(t2, Err(FetchError::Transport("reset".to_string())));

        assert!(matches!(outcome, ApplyOutcome::Failed { .. }));
        assert_eq!(view.orders().len(), 2);
        assert_eq!(view.error(), Some(crate::FETCH_FAILED_MESSAGE));

        let t3 = view.begin(filter());
        view.complete(t3, Ok(orders(4)));
        assert!(view.error().is_none());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut view = ReportView::new();
        let older = view.begin(filter());
        let newer = view.begin(
            ReportFilter::new(DateRange::parse("2024-04-01", "2024-04-30").unwrap()),
        );

        assert_eq!(view.complete(newer, Ok(orders(5))), ApplyOutcome::Applied { orders: 5 });
        assert_eq!(view.complete(older, Ok(orders(1))), ApplyOutcome::Stale);

        assert_eq!(view.orders().len(), 5);
        assert_eq!(view.filter().unwrap().range.start().to_string(), "2024-04-01");
    }

    #[test]
    fn test_stale_failure_does_not_set_error() {
        let mut view = ReportView::new();
        let older = view.begin(filter());
        let _newer = view.begin(filter());

        let outcome = view.complete(older, Err(FetchError::Decode("bad".to_string())));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(view.error().is_none());
        assert!(view.is_loading());
    }

    #[test]
    fn test_summary_of_empty_view() {
        let view = ReportView::new();
        let summary = view.summary();
        assert_eq!(summary.totals.order_count, 0);
        assert!(summary.by_status[0].synthetic);
    }
}
