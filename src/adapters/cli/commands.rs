//! CLI Command Definitions
//!
//! Argument parsing for the vantage-feed command line tool.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// vantage-feed - Alpha Vantage market data fetcher
#[derive(Parser, Debug)]
#[command(
    name = "vantage-feed",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Fetch normalized stock quotes from the Alpha Vantage API",
    long_about = "vantage-feed fetches daily or intraday stock series from Alpha Vantage \
                  and normalizes them into flat quote points with derived change metrics."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the daily historical series for a symbol
    History(HistoryCmd),

    /// Fetch the most recent intraday quote for a symbol
    Latest(LatestCmd),
}

/// Output format for fetched points
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Fetch daily historical series
#[derive(Parser, Debug)]
pub struct HistoryCmd {
    /// Ticker symbol (e.g. IBM)
    #[arg(value_name = "SYMBOL")]
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Only print the N most recent points
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Fetch latest intraday quote
#[derive(Parser, Debug)]
pub struct LatestCmd {
    /// Ticker symbol (e.g. IBM)
    #[arg(value_name = "SYMBOL")]
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
