//! `rapor loadtest`

use crate::formatter::OutputFormatter;
use anyhow::{Context, Result};
use colored::*;
use rapor_config::RaporConfig;
use rapor_loadtest::{evaluate_thresholds, LoadRunner, LoadTestResults, ThresholdVerdict};
use serde_json::json;
use tracing::info;

/// Run the load test; returns whether every threshold passed
pub async fn handle_loadtest(
    config: &RaporConfig,
    base_url: Option<&String>,
    as_json: bool,
) -> Result<bool> {
    let mut config = config.clone();
    if let Some(url) = base_url {
        config.loadtest.base_url = Some(url.clone());
    }

    let runner = LoadRunner::from_config(&config).context("Failed to set up load test")?;
    info!(
        target_url = config.loadtest_base_url(),
        peak = runner.plan().peak(),
        "Load test configured"
    );

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let results = runner.run_until(shutdown).await;
    let verdicts = evaluate_thresholds(&config.loadtest.thresholds, &results);
    let passed = verdicts.iter().all(|v| v.passed);

    if as_json {
        let output = json!({
            "results": results,
            "thresholds": verdicts,
            "passed": passed,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to format results as JSON")?
        );
    } else {
        print_results(&results, &verdicts);
    }

    Ok(passed)
}

fn print_results(results: &LoadTestResults, verdicts: &[ThresholdVerdict]) {
    let out = OutputFormatter::new();

    out.print_heading("Load Test Results");
    out.print_metric("Duration", format!("{:.2}s", results.duration.as_secs_f64()));
    out.print_metric("Peak virtual users", results.peak_virtual_users);
    out.print_metric(
        "Iterations",
        format!("{} ({} complete)", results.iterations, results.complete_iterations),
    );
    out.print_metric("Requests", results.total_requests);
    out.print_metric(
        "Failed",
        format!(
            "{} ({:.2}%)",
            results.failed_requests,
            results.failure_rate * 100.0
        ),
    );
    out.print_metric("Transport errors", results.transport_errors);
    out.print_metric("Requests/second", format!("{:.2}", results.requests_per_second));

    out.print_heading("Response Times");
    out.print_metric("Average", format!("{:.2}ms", results.average_response_time_ms));
    out.print_metric("P50", format!("{}ms", results.p50_response_time_ms));
    out.print_metric("P90", format!("{}ms", results.p90_response_time_ms));
    out.print_metric("P95", format!("{}ms", results.p95_response_time_ms));
    out.print_metric("P99", format!("{}ms", results.p99_response_time_ms));
    out.print_metric("Min", format!("{}ms", results.min_response_time_ms));
    out.print_metric("Max", format!("{}ms", results.max_response_time_ms));

    out.print_heading("Checks");
    let rows: Vec<Vec<String>> = results
        .steps
        .iter()
        .map(|s| {
            vec![
                s.step.clone(),
                s.requests.to_string(),
                s.checks_passed.to_string(),
                s.checks_failed.to_string(),
                format!("{:.2}%", s.check_pass_rate() * 100.0),
            ]
        })
        .collect();
    out.print_table(&["Step", "Requests", "Passed", "Failed", "Pass rate"], &rows);

    if !results.status_codes.is_empty() {
        out.print_heading("Status Codes");
        let rows: Vec<Vec<String>> = results
            .status_codes
            .iter()
            .map(|(code, count)| vec![code.to_string(), count.to_string()])
            .collect();
        out.print_table(&["Status", "Count"], &rows);
    }

    out.print_heading("Thresholds");
    for verdict in verdicts {
        if verdict.passed {
            println!("  {} {}", "✓".bright_green().bold(), verdict);
        } else {
            println!("  {} {}", "✗".bright_red().bold(), verdict.to_string().bright_red());
        }
    }
}
