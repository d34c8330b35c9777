//! CLI argument parsing definitions

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rapor_core::{Channel, OrderStatus, QuickRange};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch orders and print the report views
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fetch orders and write them to the export directory
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Which document to write
        #[arg(long, value_enum, default_value_t = ExportKind::Csv)]
        kind: ExportKind,

        /// Export directory (overrides configuration)
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,
    },

    /// Run the staged checkout load test
    Loadtest {
        /// Target API (overrides configuration)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

/// Report filter options shared by `report` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Quick range: 7d, 30d, month or custom
    #[arg(long, value_name = "RANGE")]
    pub range: Option<QuickRange>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Sales channel
    #[arg(long, value_name = "CHANNEL")]
    pub channel: Option<Channel>,

    /// Order status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Csv,
    Summary,
    Both,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration in use
    Show {
        /// Path to configuration file (optional, uses default loading logic)
        #[arg(long, value_name = "PATH")]
        config_file: Option<PathBuf>,

        /// Output format: yaml, json
        #[arg(long, value_name = "FORMAT", default_value = "yaml")]
        format: String,
    },
}
