//! CLI argument definitions for tickpair.
//!
//! Every option has a default, so a bare `tickpair` run compares the S&P 500
//! with Procter & Gamble and asks only for the two dates.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--symbol-a` | `^GSPC` | First instrument |
//! | `--label-a` | `S&P 500` | Display name of the first instrument |
//! | `--symbol-b` | `PG` | Second instrument |
//! | `--label-b` | `Procter & Gamble (PG)` | Display name of the second instrument |
//! | `--default-start` | `2000-01-01` | Start date used when the prompt is left empty |
//! | `--default-end` | `2023-01-01` | End date used when the prompt is left empty |
//! | `--output` | temporary file | Keep the SVG chart at this path |
//! | `--timeout-ms` | `10000` | Per-request HTTP timeout |
//! | `--log-level` | `RUST_LOG` or `warn` | Diagnostic verbosity on stderr |
//!
//! # Examples
//!
//! ```bash
//! # Default pair
//! tickpair
//!
//! # Compare two other tickers and write the chart elsewhere
//! tickpair --symbol-a MSFT --label-a Microsoft --symbol-b KO --label-b Coca-Cola --output /tmp/pair.svg
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{DEFAULT_END_DATE, DEFAULT_START_DATE};

/// Compare the daily returns of two instruments.
///
/// Prompts for a start and end date, downloads both daily histories, prints
/// mean and standard deviation of daily returns plus their correlation, and
/// draws a scatter plot next to a normalized price chart.
#[derive(Debug, Parser)]
#[command(name = "tickpair", author, version, about = "Two-instrument daily return comparison")]
pub struct Cli {
    /// Ticker of the first instrument.
    #[arg(long, default_value = "^GSPC")]
    pub symbol_a: String,

    /// Display name of the first instrument.
    #[arg(long, default_value = "S&P 500")]
    pub label_a: String,

    /// Ticker of the second instrument.
    #[arg(long, default_value = "PG")]
    pub symbol_b: String,

    /// Display name of the second instrument.
    #[arg(long, default_value = "Procter & Gamble (PG)")]
    pub label_b: String,

    /// Start date used when the first prompt is answered with an empty line.
    #[arg(long, default_value = DEFAULT_START_DATE)]
    pub default_start: String,

    /// End date used when the second prompt is answered with an empty line.
    #[arg(long, default_value = DEFAULT_END_DATE)]
    pub default_end: String,

    /// Keep the SVG chart at this path instead of a temporary file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Per-request HTTP timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Log verbosity; overrides RUST_LOG when given.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
