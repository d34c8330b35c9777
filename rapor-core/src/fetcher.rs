//! Fetch-and-apply driver for the report view

use crate::filter::ReportFilter;
use crate::source::OrderSource;
use crate::view::{ApplyOutcome, ReportView};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Runs report fetches against an [`OrderSource`] and applies them to a shared view.
///
/// The view lock is never held across the network call, so several refreshes
/// may be in flight at once; the view's request tickets decide which one wins.
pub struct OrderFetcher<S: ?Sized> {
    source: Arc<S>,
    view: Arc<Mutex<ReportView>>,
}

impl<S: OrderSource + ?Sized> OrderFetcher<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            view: Arc::new(Mutex::new(ReportView::new())),
        }
    }

    /// Share an existing view
    pub fn with_view(source: Arc<S>, view: Arc<Mutex<ReportView>>) -> Self {
        Self { source, view }
    }

    pub fn view(&self) -> Arc<Mutex<ReportView>> {
        Arc::clone(&self.view)
    }

    /// Fetch orders for `filter` and apply the outcome to the view
    pub async fn refresh(&self, filter: ReportFilter) -> ApplyOutcome {
        let ticket = self.view.lock().await.begin(filter.clone());
        debug!(ticket = ticket.id(), range = %filter.range, "Fetching report");

        let result = self.source.fetch_orders(&filter).await;

        let outcome = self.view.lock().await.complete(ticket, result);
        if let ApplyOutcome::Applied { orders } = outcome {
            info!(orders, range = %filter.range, "Report refreshed");
        }
        outcome
    }
}

impl<S: ?Sized> Clone for OrderFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            view: Arc::clone(&self.view),
        }
    }
}
