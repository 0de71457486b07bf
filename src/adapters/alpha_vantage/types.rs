//! Serde types for Alpha Vantage time series responses.
//!
//! The provider keys every bar field with a numeric prefix ("1. open",
//! "4. close", ...) and nests the series under a function-dependent
//! top-level key ("Time Series (Daily)", "Time Series (1min)", ...), so
//! only the bar itself gets a typed struct; the envelope is handled
//! dynamically in the client.

use serde::Deserialize;

/// Top-level key prefix under which the provider nests the quote series.
pub const SERIES_KEY_PREFIX: &str = "Time Series";

/// Top-level keys the provider uses to report errors inside 200 responses:
/// unknown symbol, throttling, invalid API key.
pub const ERROR_PAYLOAD_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// One raw OHLCV bar as returned by the provider. All values arrive as
/// strings; high and low are never consumed and are left undeclared.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}
