use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized market data point: a flattened OHLCV bar plus derived
/// change metrics.
///
/// `change` and `change_percent` are derived from the bar's open and close
/// and are only ever computed in [`MarketDataPoint::from_bar`], so the
/// invariants `change == price - open` and
/// `change_percent == change / open * 100.0` hold for every point.
///
/// When the period's open is zero, `change_percent` follows IEEE 754
/// division: `+inf` for a positive change, `-inf` for a negative change,
/// and `NaN` when the close is also zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataPoint {
    /// Ticker symbol as supplied by the caller (not validated here).
    pub symbol: String,
    /// Point in time the quote applies to.
    pub timestamp: DateTime<Utc>,
    /// Closing price for the period.
    pub price: f64,
    /// Traded volume for the period.
    pub volume: u64,
    /// Absolute change over the period: `price - open`.
    pub change: f64,
    /// Relative change over the period: `change / open * 100`.
    pub change_percent: f64,
}

impl MarketDataPoint {
    /// Build a point from one raw bar, computing the derived fields.
    pub fn from_bar(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        open: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        let change = close - open;
        Self {
            symbol: symbol.into(),
            timestamp,
            price: close,
            volume,
            change,
            change_percent: change / open * 100.0,
        }
    }
}
