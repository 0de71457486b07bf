//! Alpha Vantage API Client
//!
//! HTTP client for the Alpha Vantage stock data API. Fetches daily and
//! intraday time series and normalizes them into [`MarketDataPoint`]
//! values. Each call is a single stateless GET with no retry, no backoff
//! and no caching; failures are logged where they occur and propagated
//! unchanged.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use serde_json::Value;

use crate::domain::MarketDataPoint;
use crate::ports::market_data::{MarketDataError, MarketDataSource};

use super::types::{QuoteBar, ERROR_PAYLOAD_KEYS, SERIES_KEY_PREFIX};

/// Alpha Vantage client configuration.
///
/// The function identifiers are provider-defined constants; they select
/// which series endpoint a call hits and therefore which top-level key
/// the response nests the series under.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    /// Base URL for the query endpoint
    pub base_url: String,
    /// API key (free tier keys work, with tight rate limits)
    pub api_key: String,
    /// Function identifier for the daily series
    pub daily_function: String,
    /// Function identifier for the intraday series
    pub intraday_function: String,
    /// Intraday bar interval, e.g. "1min"
    pub intraday_interval: String,
    /// Transport-level request timeout
    pub timeout: Duration,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co/query".to_string(),
            api_key: String::new(),
            daily_function: "TIME_SERIES_DAILY".to_string(),
            intraday_function: "TIME_SERIES_INTRADAY".to_string(),
            intraday_interval: "1min".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Alpha Vantage market data client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    config: AlphaVantageConfig,
    http: Client,
}

impl AlphaVantageClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_config(AlphaVantageConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: AlphaVantageConfig) -> Result<Self, MarketDataError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the daily series for `symbol`, one normalized point per
    /// trading day, sorted ascending by timestamp.
    pub async fn fetch_historical(
        &self,
        symbol: &str,
    ) -> Result<Vec<MarketDataPoint>, MarketDataError> {
        self.fetch_series(&self.config.daily_function, symbol, None)
            .await
            .inspect_err(|err| tracing::error!(symbol, %err, "historical fetch failed"))
    }

    /// Fetch the most recent intraday point for `symbol`.
    ///
    /// The provider documents its first key as the most recent interval,
    /// but that ordering is not trusted: the entry with the maximum parsed
    /// timestamp is selected.
    pub async fn fetch_latest(&self, symbol: &str) -> Result<MarketDataPoint, MarketDataError> {
        let result = self
            .fetch_series(
                &self.config.intraday_function,
                symbol,
                Some(&self.config.intraday_interval),
            )
            .await
            // fetch_series sorts ascending, so the last point is the latest
            .and_then(|points| {
                points
                    .into_iter()
                    .next_back()
                    .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))
            });

        result.inspect_err(|err| tracing::error!(symbol, %err, "latest fetch failed"))
    }

    /// Issue one GET for the given series function and decode the response.
    async fn fetch_series(
        &self,
        function: &str,
        symbol: &str,
        interval: Option<&str>,
    ) -> Result<Vec<MarketDataPoint>, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidSymbol);
        }

        let mut query = vec![
            ("function", function),
            ("symbol", symbol),
            ("apikey", self.config.api_key.as_str()),
        ];
        if let Some(interval) = interval {
            query.push(("interval", interval));
        }

        tracing::debug!(symbol, function, "requesting time series");

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Remote(format!(
                "status {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let series = parse_series_body(symbol, &body)?;
        points_from_series(symbol, series)
    }
}

impl Default for AlphaVantageClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default AlphaVantageClient")
    }
}

#[async_trait]
impl MarketDataSource for AlphaVantageClient {
    async fn fetch_historical(
        &self,
        symbol: &str,
    ) -> Result<Vec<MarketDataPoint>, MarketDataError> {
        AlphaVantageClient::fetch_historical(self, symbol).await
    }

    async fn fetch_latest(&self, symbol: &str) -> Result<MarketDataPoint, MarketDataError> {
        AlphaVantageClient::fetch_latest(self, symbol).await
    }
}

/// Decode a raw response body into the quote series.
///
/// Detects provider error payloads (reported inside 200 responses), then
/// locates the series under the function-dependent "Time Series (...)"
/// key. A missing key is a shape error; a present-but-empty series is a
/// distinct "no data" error so neither operation can return a silently
/// empty result.
fn parse_series_body(
    symbol: &str,
    body: &str,
) -> Result<BTreeMap<String, QuoteBar>, MarketDataError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| MarketDataError::Parse(format!("invalid JSON body: {e}")))?;

    let object = root
        .as_object()
        .ok_or_else(|| MarketDataError::Parse("response body is not a JSON object".into()))?;

    for key in ERROR_PAYLOAD_KEYS {
        if let Some(message) = object.get(key).and_then(Value::as_str) {
            return Err(MarketDataError::Remote(format!("{key}: {message}")));
        }
    }

    let series_value = object
        .iter()
        .find(|(key, value)| key.starts_with(SERIES_KEY_PREFIX) && value.is_object())
        .map(|(_, value)| value.clone())
        .ok_or_else(|| MarketDataError::MissingSeries(symbol.to_string()))?;

    let series: BTreeMap<String, QuoteBar> = serde_json::from_value(series_value)
        .map_err(|e| MarketDataError::Parse(format!("malformed quote record: {e}")))?;

    if series.is_empty() {
        return Err(MarketDataError::EmptySeries(symbol.to_string()));
    }
    Ok(series)
}

/// Normalize a decoded series into points, sorted ascending by timestamp.
fn points_from_series(
    symbol: &str,
    series: BTreeMap<String, QuoteBar>,
) -> Result<Vec<MarketDataPoint>, MarketDataError> {
    let mut points = Vec::with_capacity(series.len());

    for (key, bar) in &series {
        let timestamp = parse_timestamp(key)?;
        let open = parse_price("1. open", &bar.open)?;
        let close = parse_price("4. close", &bar.close)?;
        let volume: u64 = bar.volume.trim().parse().map_err(|_| {
            MarketDataError::Parse(format!("invalid volume {:?} at {key}", bar.volume))
        })?;

        points.push(MarketDataPoint::from_bar(symbol, timestamp, open, close, volume));
    }

    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}

/// Parse a series key in either the intraday ("2024-01-01 16:00:00") or
/// daily ("2024-01-01", pinned to midnight) format, as UTC.
fn parse_timestamp(key: &str) -> Result<DateTime<Utc>, MarketDataError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(key, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        .map_err(|_| MarketDataError::Parse(format!("invalid timestamp key {key:?}")))
}

/// Parse a decimal price string; non-finite values are rejected rather
/// than carried through as NaN fields.
fn parse_price(field: &str, raw: &str) -> Result<f64, MarketDataError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MarketDataError::Parse(format!("invalid {field} value {raw:?}")))?;
    if !value.is_finite() {
        return Err(MarketDataError::Parse(format!(
            "non-finite {field} value {raw:?}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    const DAILY_BODY: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "ABC"
        },
        "Time Series (Daily)": {
            "2024-01-02": {
                "1. open": "105.00",
                "2. high": "112.00",
                "3. low": "104.50",
                "4. close": "110.00",
                "5. volume": "3500"
            },
            "2024-01-01": {
                "1. open": "100.00",
                "2. high": "106.00",
                "3. low": "99.00",
                "4. close": "105.00",
                "5. volume": "2000"
            }
        }
    }"#;

    #[test]
    fn test_config_default() {
        let config = AlphaVantageConfig::default();
        assert_eq!(config.base_url, "https://www.alphavantage.co/query");
        assert_eq!(config.daily_function, "TIME_SERIES_DAILY");
        assert_eq!(config.intraday_function, "TIME_SERIES_INTRADAY");
        assert_eq!(config.intraday_interval, "1min");
    }

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_config() {
        let config = AlphaVantageConfig {
            base_url: "https://example.com/query".to_string(),
            ..Default::default()
        };
        let client = AlphaVantageClient::with_config(config).unwrap();
        assert_eq!(client.base_url(), "https://example.com/query");
    }

    #[test]
    fn test_parse_daily_body_one_point_per_entry() {
        let series = parse_series_body("ABC", DAILY_BODY).unwrap();
        let points = points_from_series("ABC", series).unwrap();

        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_points_sorted_ascending() {
        let series = parse_series_body("ABC", DAILY_BODY).unwrap();
        let points = points_from_series("ABC", series).unwrap();

        assert!(points[0].timestamp < points[1].timestamp);
        assert_eq!(points[0].price, 105.0);
        assert_eq!(points[1].price, 110.0);
    }

    #[test]
    fn test_normalization_example() {
        // {"1. open": "100.00", "4. close": "105.00", "5. volume": "2000"}
        // on 2024-01-01 must yield price 105.0, volume 2000, change 5.0,
        // change_percent 5.0.
        let series = parse_series_body("ABC", DAILY_BODY).unwrap();
        let points = points_from_series("ABC", series).unwrap();
        let point = &points[0];

        assert_eq!(point.symbol, "ABC");
        assert_eq!(
            point.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(point.price, 105.0);
        assert_eq!(point.volume, 2000);
        assert_relative_eq!(point.change, 5.0, epsilon = 1e-9);
        assert_relative_eq!(point.change_percent, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_derived_fields_hold_for_every_point() {
        let series = parse_series_body("ABC", DAILY_BODY).unwrap();
        let points = points_from_series("ABC", series).unwrap();

        let opens = [100.0, 105.0];
        for (point, open) in points.iter().zip(opens) {
            assert_relative_eq!(point.change, point.price - open, epsilon = 1e-9);
            assert_relative_eq!(
                point.change_percent,
                point.change / open * 100.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_intraday_body_latest_is_max_timestamp() {
        // Keys deliberately out of order; the provider's "first key is
        // latest" convention is not relied on.
        let body = r#"{
            "Time Series (1min)": {
                "2024-01-01 09:31:00": {
                    "1. open": "10.0", "4. close": "11.0", "5. volume": "50"
                },
                "2024-01-01 09:33:00": {
                    "1. open": "11.5", "4. close": "12.0", "5. volume": "70"
                },
                "2024-01-01 09:32:00": {
                    "1. open": "11.0", "4. close": "11.5", "5. volume": "60"
                }
            }
        }"#;

        let series = parse_series_body("ABC", body).unwrap();
        let points = points_from_series("ABC", series).unwrap();
        let latest = points.last().unwrap();

        assert_eq!(
            latest.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 33, 0).unwrap()
        );
        assert_eq!(latest.price, 12.0);
    }

    #[test]
    fn test_single_intraday_entry() {
        let body = r#"{
            "Time Series (1min)": {
                "2024-01-01 16:00:00": {
                    "1. open": "10.0", "4. close": "10.5", "5. volume": "42"
                }
            }
        }"#;

        let series = parse_series_body("ABC", body).unwrap();
        let points = points_from_series("ABC", series).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 10.5);
        assert_eq!(points[0].volume, 42);
        assert_relative_eq!(points[0].change, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_series_key() {
        let body = r#"{"Meta Data": {"2. Symbol": "ABC"}}"#;
        let result = parse_series_body("ABC", body);
        assert!(matches!(result, Err(MarketDataError::MissingSeries(_))));
    }

    #[test]
    fn test_empty_series_is_no_data_error() {
        let body = r#"{"Time Series (1min)": {}}"#;
        let result = parse_series_body("ABC", body);
        assert!(matches!(result, Err(MarketDataError::EmptySeries(_))));
    }

    #[test]
    fn test_invalid_json_body() {
        let result = parse_series_body("ABC", "not json at all");
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }

    #[test]
    fn test_provider_error_payload() {
        let body = r#"{"Error Message": "Invalid API call for symbol NOPE"}"#;
        let result = parse_series_body("NOPE", body);
        assert!(matches!(result, Err(MarketDataError::Remote(_))));
    }

    #[test]
    fn test_provider_throttle_note() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! 5 calls per minute"}"#;
        let result = parse_series_body("ABC", body);
        assert!(matches!(result, Err(MarketDataError::Remote(_))));
    }

    #[test]
    fn test_malformed_price_is_parse_error() {
        let body = r#"{
            "Time Series (Daily)": {
                "2024-01-01": {
                    "1. open": "not-a-number", "4. close": "105.00", "5. volume": "2000"
                }
            }
        }"#;

        let series = parse_series_body("ABC", body).unwrap();
        let result = points_from_series("ABC", series);
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }

    #[test]
    fn test_non_finite_price_is_parse_error() {
        // "NaN" parses as an f64 but must not leak into the output
        let result = parse_price("4. close", "NaN");
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }

    #[test]
    fn test_malformed_volume_is_parse_error() {
        let body = r#"{
            "Time Series (Daily)": {
                "2024-01-01": {
                    "1. open": "100.00", "4. close": "105.00", "5. volume": "2000.5"
                }
            }
        }"#;

        let series = parse_series_body("ABC", body).unwrap();
        let result = points_from_series("ABC", series);
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }

    #[test]
    fn test_malformed_timestamp_key() {
        let body = r#"{
            "Time Series (Daily)": {
                "January 1st": {
                    "1. open": "100.00", "4. close": "105.00", "5. volume": "2000"
                }
            }
        }"#;

        let series = parse_series_body("ABC", body).unwrap();
        let result = points_from_series("ABC", series);
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2024-01-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-01-01 16:00:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 16, 0, 0).unwrap()
        );
        assert!(parse_timestamp("01/01/2024").is_err());
    }

    #[tokio::test]
    async fn test_empty_symbol_rejected_before_request() {
        let client = AlphaVantageClient::new().unwrap();

        let result = client.fetch_historical("  ").await;
        assert!(matches!(result, Err(MarketDataError::InvalidSymbol)));

        let result = client.fetch_latest("").await;
        assert!(matches!(result, Err(MarketDataError::InvalidSymbol)));
    }
}
