//! vantage-feed - Alpha Vantage Market Data Fetcher
//!
//! Fetches daily or intraday stock series from Alpha Vantage and prints
//! normalized quote points.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use vantage_feed::adapters::cli::{CliApp, Command, HistoryCmd, LatestCmd, OutputFormat};
use vantage_feed::adapters::{AlphaVantageClient, AlphaVantageConfig};
use vantage_feed::config::load_config;
use vantage_feed::domain::MarketDataPoint;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (the API key goes here, not in config)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::History(cmd) => history_command(cmd).await,
        Command::Latest(cmd) => latest_command(cmd).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

/// Build a client from the config file at `path`
fn build_client(path: &std::path::Path) -> Result<AlphaVantageClient> {
    let config = load_config(path).context("Failed to load configuration")?;
    AlphaVantageClient::with_config(AlphaVantageConfig::from(&config))
        .context("Failed to create Alpha Vantage client")
}

/// Handle history command
async fn history_command(cmd: HistoryCmd) -> Result<()> {
    tracing::info!("Fetching daily series for {}", cmd.symbol);

    let client = build_client(&cmd.config)?;
    let mut points = client
        .fetch_historical(&cmd.symbol)
        .await
        .with_context(|| format!("Failed to fetch historical data for {}", cmd.symbol))?;

    // Points arrive sorted ascending; keep the most recent N
    if let Some(limit) = cmd.limit {
        let skip = points.len().saturating_sub(limit);
        points.drain(..skip);
    }

    print_points(&points, cmd.format)
}

/// Handle latest command
async fn latest_command(cmd: LatestCmd) -> Result<()> {
    tracing::info!("Fetching latest intraday quote for {}", cmd.symbol);

    let client = build_client(&cmd.config)?;
    let point = client
        .fetch_latest(&cmd.symbol)
        .await
        .with_context(|| format!("Failed to fetch latest quote for {}", cmd.symbol))?;

    print_points(std::slice::from_ref(&point), cmd.format)
}

/// Print points in the requested format
fn print_points(points: &[MarketDataPoint], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(points)?);
        }
        OutputFormat::Text => {
            println!(
                "{:<20}  {:>12}  {:>12}  {:>10}  {:>9}",
                "timestamp", "close", "volume", "change", "change%"
            );
            for p in points {
                println!(
                    "{:<20}  {:>12.4}  {:>12}  {:>+10.4}  {:>+8.2}%",
                    p.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    p.price,
                    p.volume,
                    p.change,
                    p.change_percent
                );
            }
        }
    }
    Ok(())
}
