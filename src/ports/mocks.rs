use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::MarketDataPoint;

use super::market_data::{MarketDataError, MarketDataSource};

/// Mock market data source that records calls and serves canned points.
///
/// Symbols with no configured response fail with `EmptySeries`, which is
/// also the easiest way to exercise the error path in tests.
#[derive(Debug, Default)]
pub struct MockMarketDataSource {
    calls: Arc<Mutex<Vec<String>>>,
    historical: Arc<Mutex<HashMap<String, Vec<MarketDataPoint>>>>,
}

impl MockMarketDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the series returned for a given symbol.
    pub fn with_series(self, symbol: &str, points: Vec<MarketDataPoint>) -> Self {
        self.historical
            .lock()
            .unwrap()
            .insert(symbol.to_string(), points);
        self
    }

    /// Get all recorded calls, formatted as "operation:symbol".
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn series_for(&self, symbol: &str) -> Vec<MarketDataPoint> {
        self.historical
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MarketDataSource for MockMarketDataSource {
    async fn fetch_historical(
        &self,
        symbol: &str,
    ) -> Result<Vec<MarketDataPoint>, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidSymbol);
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("historical:{symbol}"));

        let points = self.series_for(symbol);
        if points.is_empty() {
            return Err(MarketDataError::EmptySeries(symbol.to_string()));
        }
        Ok(points)
    }

    async fn fetch_latest(&self, symbol: &str) -> Result<MarketDataPoint, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidSymbol);
        }
        self.calls.lock().unwrap().push(format!("latest:{symbol}"));

        self.series_for(symbol)
            .into_iter()
            .max_by_key(|p| p.timestamp)
            .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))
    }
}
