//! # Salesboard CLI
//!
//! Prints the seller performance report for a JSON sales dataset.
//!
//! ## Usage
//! ```bash
//! # Table on stdout
//! salesboard --data demos/sales.json
//!
//! # JSON for other tools, custom bonus tiers
//! salesboard --data demos/sales.json --config report.toml --format json
//!
//! # Show what the analysis is doing (logs go to stderr)
//! salesboard --data demos/sales.json --verbose
//! ```

mod config;
mod error;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use salesboard_core::{analyze_sales_data, ReportSummary, SalesData};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, ReportConfig};
use crate::error::{CliError, CliResult};

#[derive(Debug, Parser)]
#[command(
    name = "salesboard",
    about = "Seller performance report: revenue, profit, top products, bonuses",
    after_help = "Examples:\n  salesboard --data sales.json\n  salesboard --data sales.json --format json"
)]
struct Cli {
    /// Sales dataset (JSON with sellers, products, customers, purchase_records)
    #[arg(long, short = 'd')]
    data: PathBuf,

    /// Config file (defaults to the platform config dir)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output format, overrides config and environment
    #[arg(long, short = 'f', value_enum)]
    format: Option<OutputFormat>,

    /// Log analysis progress to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Report failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = ReportConfig::load(cli.config)?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    let data = load_sales_data(&cli.data)?;
    let report = analyze_sales_data(&data, &config.analysis_options())?;
    let summary = ReportSummary::from_entries(&report);
    info!(sellers = summary.sellers, sales = summary.total_sales, "Report ready");

    let rendered = match config.output.format {
        OutputFormat::Json => output::render_json(&report, &summary, Utc::now())?,
        OutputFormat::Table => output::render_table(&report, &summary),
    };
    println!("{rendered}");
    Ok(())
}

fn load_sales_data(path: &Path) -> CliResult<SalesData> {
    info!(?path, "Loading sales data");
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SalesData::from_json(&contents)?)
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=salesboard_core=trace` - Every folded line item
/// - `--verbose` - debug when RUST_LOG is unset
/// - Default: WARN level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
