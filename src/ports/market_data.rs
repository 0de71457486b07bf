use async_trait::async_trait;
use thiserror::Error;

use crate::domain::MarketDataPoint;

/// Market data error taxonomy.
///
/// Three classes of failure cross the port boundary: transport errors
/// (network/DNS/timeout), remote errors (non-2xx status or a provider
/// error payload), and shape errors (missing or empty time series in an
/// otherwise well-formed response). Numeric and timestamp decode failures
/// are their own variant so a malformed quote never decays into NaN
/// fields in the output.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("symbol must not be empty")]
    InvalidSymbol,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider error: {0}")]
    Remote(String),

    #[error("no time series in response for symbol {0}")]
    MissingSeries(String),

    #[error("time series is empty for symbol {0}")]
    EmptySeries(String),

    #[error("failed to decode quote data: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        MarketDataError::Transport(err.to_string())
    }
}

/// Market data source port.
///
/// The single provider interface: one implementation per vendor, each call
/// a stateless request-response round trip. No retained session, no retry,
/// no caching.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the full daily series for a symbol, one point per trading day,
    /// sorted ascending by timestamp.
    async fn fetch_historical(&self, symbol: &str)
        -> Result<Vec<MarketDataPoint>, MarketDataError>;

    /// Fetch the most recent intraday point for a symbol.
    async fn fetch_latest(&self, symbol: &str) -> Result<MarketDataPoint, MarketDataError>;
}
