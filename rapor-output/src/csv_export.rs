//! Semicolon-delimited CSV export

use crate::errors::ExportError;
use crate::writer::{export_file_name, ExportOutcome, ExportWriter};
use chrono::{DateTime, Utc};
use rapor_core::OrderRow;
use tracing::debug;

/// Column headers, in output order
pub const CSV_HEADER: [&str; 6] = ["Date", "Channel", "Status", "Amount", "Customer", "CargoSlip"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Exports orders as `rapor-<epoch-ms>.csv`
#[derive(Debug, Clone)]
pub struct CsvExporter {
    writer: ExportWriter,
}

impl CsvExporter {
    pub fn new(writer: ExportWriter) -> Self {
        Self { writer }
    }

    /// Render the header plus one row per order
    pub fn render(&self, orders: &[OrderRow]) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        if self.writer.utf8_bom() {
            buffer.extend_from_slice(UTF8_BOM);
        }

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(buffer);

        wtr.write_record(CSV_HEADER).map_err(serialization_error)?;

        for order in orders {
            let date = order.date.format("%Y-%m-%d").to_string();
            let amount = order.amount.to_string();
            wtr.write_record([
                date.as_str(),
                order.channel.as_str(),
                order.status.as_str(),
                amount.as_str(),
                order.customer_name.as_str(),
                order.cargo_slip_printed_at.as_deref().unwrap_or(""),
            ])
            .map_err(serialization_error)?;
        }

        wtr.into_inner().map_err(|e| ExportError::Serialization {
            format: "csv".to_string(),
            error: e.to_string(),
        })
    }

    /// Render and write the export, stamping the file name with the current time
    pub async fn export(&self, orders: &[OrderRow]) -> Result<ExportOutcome, ExportError> {
        self.export_at(orders, Utc::now()).await
    }

    pub async fn export_at(
        &self,
        orders: &[OrderRow],
        at: DateTime<Utc>,
    ) -> Result<ExportOutcome, ExportError> {
        let data = self.render(orders)?;
        debug!(orders = orders.len(), bytes = data.len(), "Rendered CSV export");

        let path = self.writer.write(&export_file_name("csv", at), &data).await?;
        Ok(ExportOutcome {
            path,
            size_bytes: data.len() as u64,
            orders: orders.len(),
        })
    }
}

fn serialization_error(e: csv::Error) -> ExportError {
    ExportError::Serialization {
        format: "csv".to_string(),
        error: e.to_string(),
    }
}
