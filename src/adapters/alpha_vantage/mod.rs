//! Alpha Vantage Adapter
//!
//! Implements the `MarketDataSource` port against the Alpha Vantage HTTP
//! API: daily series for historical points, 1-minute intraday series for
//! the latest point.

mod client;
mod types;

pub use client::{AlphaVantageClient, AlphaVantageConfig};
pub use types::QuoteBar;
