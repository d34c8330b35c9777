mod cli;
mod commands;
mod formatter;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands};
use commands::config::{
    handle_config_generate, handle_config_show, handle_config_validate, load_config,
};
use commands::export::handle_export;
use commands::loadtest::handle_loadtest;
use commands::report::handle_report;
use rapor_logging::{init_logging_from_config, init_simple_tracing};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first; fall back to plain logging so the failure is reported
    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            init_simple_tracing(cli.log_level.as_deref().unwrap_or("info"))?;
            return Err(e);
        }
    };

    init_logging_from_config(&config.logging, cli.log_level.as_deref())?;
    info!("Rapor CLI starting");

    match &cli.command {
        Some(Commands::Report { filter, format }) => {
            handle_report(&config, filter, *format).await?;
        }
        Some(Commands::Export { filter, kind, dir }) => {
            handle_export(&config, filter, *kind, dir.as_ref()).await?;
        }
        Some(Commands::Loadtest { base_url, json }) => {
            if !handle_loadtest(&config, base_url.as_ref(), *json).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Config { config_cmd }) => match config_cmd {
            ConfigCommands::Validate { config_file } => handle_config_validate(config_file)?,
            ConfigCommands::Generate { output, force } => handle_config_generate(output, *force)?,
            ConfigCommands::Show {
                config_file,
                format,
            } => handle_config_show(config_file.as_ref().or(cli.config.as_ref()), format)?,
        },
        None => {
            // If no subcommand is provided, print help
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            cmd.print_help().context("Failed to print help")?;
            println!();
        }
    }

    Ok(ExitCode::SUCCESS)
}
