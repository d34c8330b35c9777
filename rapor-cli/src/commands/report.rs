//! `rapor report`

use crate::cli::{FilterArgs, OutputFormat};
use crate::formatter::OutputFormatter;
use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use rapor_config::domains::report::ReportConfig;
use rapor_config::RaporConfig;
use rapor_core::{
    ApplyOutcome, Channel, DateRange, FilterError, OrderFetcher, OrderRow, OrderStatus,
    QuickRange, ReportFilter, ReportSummary,
};
use rapor_http::{ClientConfig, ReportsClient};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Combine command-line filter options with the report defaults.
///
/// Explicit `--from/--to` imply a custom range; `custom` without both dates
/// is an error.
pub fn resolve_filter(
    args: &FilterArgs,
    defaults: &ReportConfig,
    today: NaiveDate,
) -> Result<ReportFilter> {
    let has_dates = args.from.is_some() || args.to.is_some();

    let range = match args.range {
        Some(range) => range,
        None if has_dates => QuickRange::Custom,
        None => defaults
            .default_range
            .parse()
            .context("Invalid default_range in report configuration")?,
    };

    let filter = match range {
        QuickRange::Custom => match (args.from, args.to) {
            (Some(from), Some(to)) => ReportFilter::new(DateRange::new(from, to)?),
            _ => return Err(FilterError::CustomRangeWithoutDates.into()),
        },
        preset => {
            if has_dates {
                return Err(anyhow!(
                    "--from/--to can only be combined with --range custom, not '{}'",
                    preset
                ));
            }
            ReportFilter::from_quick_range(preset, today)?
        }
    };

    let channel = match args.channel {
        Some(channel) => Some(channel),
        None => defaults
            .default_channel
            .as_deref()
            .map(str::parse::<Channel>)
            .transpose()
            .context("Invalid default_channel in report configuration")?,
    };

    let status = match args.status {
        Some(status) => Some(status),
        None => defaults
            .default_status
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()
            .context("Invalid default_status in report configuration")?,
    };

    Ok(filter.with_channel(channel).with_status(status))
}

/// Fetch the orders for `filter`, failing with the user-facing message
pub async fn fetch_orders(config: &RaporConfig, filter: &ReportFilter) -> Result<Vec<OrderRow>> {
    let client = ReportsClient::from_config(&config.api, &ClientConfig::from(&config.http))
        .context("Failed to create reporting client")?;
    let fetcher = OrderFetcher::new(Arc::new(client));

    match fetcher.refresh(filter.clone()).await {
        ApplyOutcome::Applied { .. } => {
            let view = fetcher.view();
            let view = view.lock().await;
            Ok(view.orders().to_vec())
        }
        ApplyOutcome::Failed { message } => Err(anyhow!(message)),
        ApplyOutcome::Stale => Err(anyhow!("Report request was superseded")),
    }
}

pub async fn handle_report(
    config: &RaporConfig,
    args: &FilterArgs,
    format: OutputFormat,
) -> Result<()> {
    let filter = resolve_filter(args, &config.report, Local::now().date_naive())?;
    info!(range = %filter.range, "Fetching report");

    let orders = fetch_orders(config, &filter).await?;
    let summary = ReportSummary::compute(&orders);

    match format {
        OutputFormat::Json => {
            let output = json!({
                "filter": filter,
                "summary": summary,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to format report as JSON")?
            );
        }
        OutputFormat::Text => print_summary(&filter, &summary),
    }

    Ok(())
}

fn print_summary(filter: &ReportFilter, summary: &ReportSummary) {
    let out = OutputFormatter::new();
    let totals = &summary.totals;

    out.print_heading(&format!(
        "Report {} to {}",
        filter.range.start(),
        filter.range.end()
    ));
    if let Some(channel) = filter.channel {
        out.print_metric("Channel", channel.label());
    }
    if let Some(status) = filter.status {
        out.print_metric("Status", status.label());
    }
    out.print_metric("Total revenue", totals.total_amount.round_dp(2));
    out.print_metric("Orders", totals.order_count);
    out.print_metric("Average basket", totals.avg_basket_display());
    out.print_metric("Return rate", format!("{:.1}%", totals.returned_rate));
    out.print_metric("Cargo slip rate", format!("{:.1}%", totals.cargo_slip_rate));

    out.print_heading("By channel");
    let rows: Vec<Vec<String>> = summary
        .by_channel
        .iter()
        .map(|b| {
            vec![
                b.channel.label().to_string(),
                b.amount.round_dp(2).to_string(),
                b.count.to_string(),
            ]
        })
        .collect();
    out.print_table(&["Channel", "Revenue", "Orders"], &rows);

    out.print_heading("By status");
    if summary.by_status.iter().any(|b| b.synthetic) {
        out.print_warning("No orders in range");
    } else {
        let rows: Vec<Vec<String>> = summary
            .by_status
            .iter()
            .map(|b| vec![b.status.label().to_string(), b.count.to_string()])
            .collect();
        out.print_table(&["Status", "Orders"], &rows);
    }

    out.print_heading("Daily");
    let rows: Vec<Vec<String>> = summary
        .time_series
        .iter()
        .map(|d| {
            vec![
                d.date.to_string(),
                d.amount.round_dp(2).to_string(),
                d.count.to_string(),
            ]
        })
        .collect();
    out.print_table(&["Date", "Revenue", "Orders"], &rows);
}
