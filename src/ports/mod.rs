//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract the market data
//! provider behind a narrow request-response interface.

pub mod market_data;
pub mod mocks;

pub use market_data::{MarketDataError, MarketDataSource};
pub use mocks::MockMarketDataSource;
