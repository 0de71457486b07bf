//! Domain Layer - Core data types for the market data feed
//!
//! Pure value types with no external dependencies. All external
//! interactions happen through the ports layer.

pub mod point;

pub use point::MarketDataPoint;
