//! Plain-text summary document

use crate::errors::ExportError;
use crate::writer::{export_file_name, ExportOutcome, ExportWriter};
use chrono::{DateTime, Utc};
use rapor_core::{OrderRow, ReportFilter, Totals};
use tracing::debug;

/// Number of orders listed under the metrics
pub const SUMMARY_ORDER_LINES: usize = 5;

/// Exports a fixed-layout summary as `rapor-<epoch-ms>.txt`
#[derive(Debug, Clone)]
pub struct SummaryExporter {
    writer: ExportWriter,
}

impl SummaryExporter {
    pub fn new(writer: ExportWriter) -> Self {
        Self { writer }
    }

    /// Render the five headline metrics followed by the first orders
    pub fn render(
        &self,
        orders: &[OrderRow],
        filter: Option<&ReportFilter>,
        generated_at: DateTime<Utc>,
    ) -> String {
        let totals = Totals::compute(orders);

        let mut lines = vec![
            "Rapor summary".to_string(),
            format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        ];
        if let Some(filter) = filter {
            lines.push(format!(
                "Range: {} to {}",
                filter.range.start(),
                filter.range.end()
            ));
            lines.extend(filter.channel.map(|c| format!("Channel: {}", c.label())));
            lines.extend(filter.status.map(|s| format!("Status: {}", s.label())));
        }

        lines.extend([
            String::new(),
            format!("Total revenue: {}", totals.total_amount.round_dp(2)),
            format!("Order count: {}", totals.order_count),
            format!("Average basket: {}", totals.avg_basket_display()),
            format!("Return rate: {:.1}%", totals.returned_rate),
            format!("Cargo slip rate: {:.1}%", totals.cargo_slip_rate),
        ]);

        if !orders.is_empty() {
            lines.push(String::new());
            lines.push("Orders:".to_string());
            lines.extend(orders.iter().take(SUMMARY_ORDER_LINES).map(|order| {
                format!(
                    "{}  {:<12} {:<11} {:>12}  {}",
                    order.date,
                    order.channel.label(),
                    order.status.label(),
                    order.amount,
                    order.customer_name
                )
            }));
        }

        let mut doc = lines.join("\n");
        doc.push('\n');
        doc
    }

    pub async fn export(
        &self,
        orders: &[OrderRow],
        filter: Option<&ReportFilter>,
    ) -> Result<ExportOutcome, ExportError> {
        self.export_at(orders, filter, Utc::now()).await
    }

    pub async fn export_at(
        &self,
        orders: &[OrderRow],
        filter: Option<&ReportFilter>,
        at: DateTime<Utc>,
    ) -> Result<ExportOutcome, ExportError> {
        let doc = self.render(orders, filter, at);
        debug!(orders = orders.len(), bytes = doc.len(), "Rendered summary export");

        let path = self
            .writer
            .write(&export_file_name("txt", at), doc.as_bytes())
            .await?;
        Ok(ExportOutcome {
            path,
            size_bytes: doc.len() as u64,
            orders: orders.len().min(SUMMARY_ORDER_LINES),
        })
    }
}
