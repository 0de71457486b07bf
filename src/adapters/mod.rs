//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Alpha Vantage: stock data API client
//! - CLI: command-line interface definitions

pub mod alpha_vantage;
pub mod cli;

pub use alpha_vantage::{AlphaVantageClient, AlphaVantageConfig};
pub use cli::CliApp;
