//! CLI Adapter
//!
//! Command-line argument definitions; handlers live in main.rs.

mod commands;

pub use commands::{CliApp, Command, HistoryCmd, LatestCmd, OutputFormat};
