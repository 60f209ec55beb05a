//! # hotelier-report
//!
//! Command-line front-end for the reporting core: booking totals, GST splits
//! and KOT deltas over JSON records exported from the backend API.
//!
//! ## Usage
//! ```text
//! hotelier-report totals --input booking.json
//! hotelier-report bookings --input bookings.json
//! hotelier-report gst --gross 1180 --rate 18
//! hotelier-report invoice --input invoice.json
//! hotelier-report invoice-report --input rows.json
//! hotelier-report kot --old old.json --new new.json
//! ```
//!
//! `--input -` reads stdin. Logs go to stderr, results to stdout.

mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "hotelier-report", version, about = "Booking, GST and KOT report figures")]
struct Cli {
    /// Config file (default: report.toml in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Totals of one booking
    Totals {
        /// Booking JSON file, or - for stdin
        #[arg(short = 'i', long)]
        input: String,
    },

    /// Column sums of a list of bookings
    Bookings {
        /// JSON array of bookings, or - for stdin
        #[arg(short = 'i', long)]
        input: String,
    },

    /// SGST/CGST contained in a GST-inclusive amount
    Gst {
        /// Gross amount including GST (negative for a credit note)
        #[arg(long, allow_negative_numbers = true)]
        gross: String,

        /// GST rate in percent
        #[arg(long)]
        rate: String,
    },

    /// SGST/CGST of one invoice
    Invoice {
        /// Invoice JSON file, or - for stdin
        #[arg(short = 'i', long)]
        input: String,
    },

    /// Per-row SGST/CGST of an invoice report and its footer
    InvoiceReport {
        /// JSON array of report rows, or - for stdin
        #[arg(short = 'i', long)]
        input: String,
    },

    /// Kitchen order ticket delta between two order snapshots
    Kot {
        /// Previously printed order (JSON array)
        #[arg(long)]
        old: String,

        /// Current order (JSON array)
        #[arg(long)]
        new: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config).context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    debug!(
        scale = config.report.scale,
        rounding = %config.report.rounding,
        duplicates = %config.report.kot.duplicates,
        "Configuration loaded"
    );

    let report = commands::run(&cli.command, &config.report)?;
    println!("{}", render::render(&report, &config)?);

    Ok(())
}

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "info,hotelier=debug";

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=hotelier_core=trace` - Show duplicate-name collapsing in KOT diffs
/// - Default: INFO level, DEBUG for hotelier crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// stderr subscriber gated only by `filter`.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}
