//! `rapor export`

use crate::cli::{ExportKind, FilterArgs};
use crate::commands::report::{fetch_orders, resolve_filter};
use crate::formatter::OutputFormatter;
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use rapor_config::RaporConfig;
use rapor_output::{CsvExporter, ExportWriter, SummaryExporter};
use std::path::PathBuf;
use tracing::info;

pub async fn handle_export(
    config: &RaporConfig,
    args: &FilterArgs,
    kind: ExportKind,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let filter = resolve_filter(args, &config.report, Local::now().date_naive())?;
    let orders = fetch_orders(config, &filter).await?;
    info!(orders = orders.len(), range = %filter.range, "Exporting report");

    let mut export_config = config.export.clone();
    if let Some(dir) = dir {
        export_config.directory = dir.clone();
    }
    let writer = ExportWriter::new(export_config);
    let out = OutputFormatter::new();
    // One timestamp so csv and summary files pair up
    let now = Utc::now();

    if matches!(kind, ExportKind::Csv | ExportKind::Both) {
        let outcome = CsvExporter::new(writer.clone())
            .export_at(&orders, now)
            .await
            .context("Failed to export CSV")?;
        out.print_success(&format!(
            "Wrote {} orders to {}",
            outcome.orders,
            outcome.path.display()
        ));
    }

    if matches!(kind, ExportKind::Summary | ExportKind::Both) {
        let outcome = SummaryExporter::new(writer)
            .export_at(&orders, Some(&filter), now)
            .await
            .context("Failed to export summary")?;
        out.print_success(&format!("Wrote summary to {}", outcome.path.display()));
    }

    Ok(())
}
