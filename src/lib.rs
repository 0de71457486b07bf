//! vantage-feed - Alpha Vantage Market Data Adapter Library
//!
//! Fetches daily and intraday stock series from the Alpha Vantage API and
//! normalizes them into flat quote points with derived change metrics.
//!
//! # Modules
//!
//! - `domain`: Core data types (MarketDataPoint)
//! - `ports`: Trait abstractions (MarketDataSource) and test mocks
//! - `adapters`: External implementations (Alpha Vantage client, CLI)
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
